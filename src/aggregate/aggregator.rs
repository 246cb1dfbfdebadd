//! The faceted aggregator
//!
//! Each facet operation is one linear scan into a fresh [`GroupSet`] followed
//! by one stable sort. Nothing is cached between calls and the record set is
//! never mutated, so an `Aggregator` can be shared across threads.

use std::collections::BTreeMap;

use chrono::{Days, Local, NaiveDate};

use crate::lookup::SubjectDirectory;
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::record::fields::{
    creators, date_year, eprint_id, has_creator_ids, lastmod, lastmod_date, object_type,
    string_field, subject_codes,
};
use crate::record::{make_label, slugify, Record};

use super::errors::AggregateResult;
use super::facet::FacetKind;
use super::group::{GroupDescriptor, GroupSet};
use super::sorter::{GroupSorter, SortDirection, SortField, SortSpec};

/// Width of the recently-modified window in days
pub const LATEST_WINDOW_DAYS: u64 = 7;

/// Faceted aggregation over one record set
#[derive(Debug, Clone)]
pub struct Aggregator {
    name: String,
    records: Vec<Record>,
    today: Option<NaiveDate>,
}

impl Aggregator {
    /// Creates an aggregator for a named record set.
    ///
    /// The name is only used in diagnostics.
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
            today: None,
        }
    }

    /// Pin the date the latest window ends on instead of reading the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Returns the record set name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the records in input order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    // =========================================================================
    // Contributor
    // =========================================================================

    /// Groups records by creator id, sorted by display name.
    ///
    /// Only creators carrying both an id and a display name form groups. A
    /// record lands in one group per such creator.
    pub fn aggregate_people(&self) -> Vec<GroupDescriptor<'_>> {
        let mut people = GroupSet::new();

        for record in self.records.iter().filter(|r| has_creator_ids(r)) {
            for creator in creators(record) {
                let (Some(id), Some(name)) = (creator.identifier(), creator.display_name.as_deref())
                else {
                    continue;
                };
                people.add_with(id, record, || {
                    GroupDescriptor::new(id, name)
                        .with_extra("people_id", id)
                        .with_extra("sort_name", name)
                });
            }
        }

        let mut groups = people.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::asc(SortField::Label));
        groups
    }

    /// Same as [`Aggregator::aggregate_people`]
    pub fn aggregate_person(&self) -> Vec<GroupDescriptor<'_>> {
        self.aggregate_people()
    }

    /// Same as [`Aggregator::aggregate_people`]
    pub fn aggregate_person_az(&self) -> Vec<GroupDescriptor<'_>> {
        self.aggregate_people()
    }

    /// Same as [`Aggregator::aggregate_people`]
    pub fn aggregate_author(&self) -> Vec<GroupDescriptor<'_>> {
        self.aggregate_people()
    }

    // =========================================================================
    // Single-valued facets
    // =========================================================================

    /// Groups records by year, most recent first
    pub fn aggregate_year(&self) -> Vec<GroupDescriptor<'_>> {
        let mut years = GroupSet::new();

        for record in &self.records {
            let Some(year) = date_year(record) else {
                continue;
            };
            years.add_with(&year, record, || {
                GroupDescriptor::new(year.as_str(), year.as_str()).with_extra("year", year.as_str())
            });
        }

        let mut groups = years.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::desc(SortField::Key));
        groups
    }

    /// Groups records by publication title
    pub fn aggregate_publication(&self) -> Vec<GroupDescriptor<'_>> {
        self.group_by_labelled_field("publication", SortField::Label)
    }

    /// Groups records by ISSN
    pub fn aggregate_issn(&self) -> Vec<GroupDescriptor<'_>> {
        let mut issns = GroupSet::new();

        for record in &self.records {
            let Some(issn) = string_field(record, "issn") else {
                continue;
            };
            issns.add_with(&issn, record, || {
                GroupDescriptor::new(issn.as_str(), issn.as_str())
                    .with_extra("year", date_year(record).unwrap_or_default())
            });
        }

        let mut groups = issns.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::asc(SortField::Key));
        groups
    }

    /// Groups records by collection name
    pub fn aggregate_collection(&self) -> Vec<GroupDescriptor<'_>> {
        self.group_by_labelled_field("collection", SortField::Label)
    }

    /// Groups records by event title.
    ///
    /// Records with no event title are kept, grouped under the empty key.
    pub fn aggregate_event(&self) -> Vec<GroupDescriptor<'_>> {
        let mut events = GroupSet::new();

        for record in &self.records {
            let title = string_field(record, "event_title").unwrap_or_default();
            let key = slugify(&title);
            events.add_with(&key, record, || {
                GroupDescriptor::new(key.as_str(), title.as_str())
                    .with_extra("year", date_year(record).unwrap_or_default())
            });
        }

        let mut groups = events.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::asc(SortField::TrimmedLabel));
        groups
    }

    /// Groups records by record identifier, in numeric order.
    ///
    /// Fails if any identifier is not an integer.
    pub fn aggregate_ids(&self) -> AggregateResult<Vec<GroupDescriptor<'_>>> {
        let mut ids = GroupSet::new();

        for record in &self.records {
            let Some(id) = eprint_id(record) else {
                continue;
            };
            ids.add_with(&id, record, || {
                GroupDescriptor::new(id.as_str(), id.as_str()).with_extra("eprint_id", id.as_str())
            });
        }

        GroupSorter::sort_numeric(ids.into_groups(), SortDirection::Asc, FacetKind::Ids.as_str())
    }

    /// Groups records by object type code
    pub fn aggregate_types(&self) -> Vec<GroupDescriptor<'_>> {
        let mut types = GroupSet::new();

        for record in &self.records {
            let Some(o_type) = object_type(record) else {
                continue;
            };
            types.add_with(&o_type, record, || {
                GroupDescriptor::new(o_type.as_str(), make_label(&o_type, '_'))
                    .with_extra("type", o_type.as_str())
            });
        }

        let mut groups = types.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::asc(SortField::Key));
        groups
    }

    // =========================================================================
    // Subjects
    // =========================================================================

    /// Groups records by subject code, sorted by resolved subject name.
    ///
    /// Codes the directory does not know are dropped.
    pub fn aggregate_subjects<D>(&self, subjects: &D) -> Vec<GroupDescriptor<'_>>
    where
        D: SubjectDirectory + ?Sized,
    {
        let mut groups = GroupSet::new();

        for record in &self.records {
            let Some(codes) = subject_codes(record) else {
                continue;
            };
            for code in codes {
                let Some(name) = subjects.resolve(&code) else {
                    continue;
                };
                groups.add_with(&code, record, || {
                    GroupDescriptor::new(code.as_str(), name.as_str())
                        .with_extra("subject_id", code.as_str())
                        .with_extra("subject_name", name.as_str())
                });
            }
        }

        let mut groups = groups.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::asc(SortField::Label));
        groups
    }

    // =========================================================================
    // Recently modified
    // =========================================================================

    /// Groups records modified in the past week, newest first.
    ///
    /// The window ends on the pinned date if one was set, else on the local
    /// current date.
    pub fn aggregate_latest(&self) -> Vec<GroupDescriptor<'_>> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        self.aggregate_latest_as_of(today)
    }

    /// Groups records whose `lastmod` date falls within the week ending on
    /// `today`. Each distinct full timestamp is its own group.
    pub fn aggregate_latest_as_of(&self, today: NaiveDate) -> Vec<GroupDescriptor<'_>> {
        let cutoff = today
            .checked_sub_days(Days::new(LATEST_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN)
            .format("%Y-%m-%d")
            .to_string();

        let mut latest = GroupSet::new();

        for record in &self.records {
            let (Some(stamp), Some(day)) = (lastmod(record), lastmod_date(record)) else {
                continue;
            };
            if day.is_empty() || day < cutoff {
                continue;
            }
            latest.add_with(&stamp, record, || {
                GroupDescriptor::new(stamp.as_str(), day.as_str())
                    .with_extra("year", date_year(record).unwrap_or_default())
            });
        }

        let mut groups = latest.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::desc(SortField::Key));
        groups
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Build one facet by kind.
    ///
    /// Without a subject directory the subject facet is empty.
    pub fn aggregate(
        &self,
        kind: FacetKind,
        subjects: Option<&dyn SubjectDirectory>,
    ) -> AggregateResult<Vec<GroupDescriptor<'_>>> {
        let scope = ObservationScope::with_fields(
            "FACET",
            &[("facet", kind.as_str()), ("name", self.name.as_str())],
        );

        let groups = match kind {
            FacetKind::Ids => match self.aggregate_ids() {
                Ok(groups) => groups,
                Err(e) => {
                    scope.fail(e.message());
                    return Err(e);
                }
            },
            FacetKind::People => self.aggregate_people(),
            FacetKind::Year => self.aggregate_year(),
            FacetKind::Publication => self.aggregate_publication(),
            FacetKind::Issn => self.aggregate_issn(),
            FacetKind::Collection => self.aggregate_collection(),
            FacetKind::Event => self.aggregate_event(),
            FacetKind::Subjects => match subjects {
                Some(directory) => self.aggregate_subjects(directory),
                None => Vec::new(),
            },
            FacetKind::Types => self.aggregate_types(),
            FacetKind::Latest => self.aggregate_latest(),
        };

        if groups.is_empty() {
            log_event_with_fields(
                Event::FacetEmpty,
                &[("facet", kind.as_str()), ("name", self.name.as_str())],
            );
        }

        let count = groups.len().to_string();
        scope.complete_with_fields(&[("groups", count.as_str())]);
        Ok(groups)
    }

    /// Build every requested facet, keyed by canonical facet name.
    ///
    /// Aliases of one facet are built once.
    pub fn aggregate_views(
        &self,
        views: &[FacetKind],
        subjects: Option<&dyn SubjectDirectory>,
    ) -> AggregateResult<BTreeMap<&'static str, Vec<GroupDescriptor<'_>>>> {
        let mut built = BTreeMap::new();
        for &kind in views {
            if built.contains_key(kind.as_str()) {
                continue;
            }
            let groups = self.aggregate(kind, subjects)?;
            built.insert(kind.as_str(), groups);
        }
        Ok(built)
    }

    /// Shared builder for facets keyed by a slugified string field and
    /// labelled with the raw value
    fn group_by_labelled_field(&self, field: &str, sort: SortField) -> Vec<GroupDescriptor<'_>> {
        let mut set = GroupSet::new();

        for record in &self.records {
            let Some(value) = string_field(record, field) else {
                continue;
            };
            let key = slugify(&value);
            set.add_with(&key, record, || {
                GroupDescriptor::new(key.as_str(), value.as_str())
                    .with_extra("year", date_year(record).unwrap_or_default())
            });
        }

        let mut groups = set.into_groups();
        GroupSorter::sort(&mut groups, SortSpec::asc(sort));
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::errors::AggregateErrorCode;
    use crate::lookup::SubjectMap;
    use serde_json::{json, Value};

    fn aggregator(records: Vec<Value>) -> Aggregator {
        Aggregator::new("test", records.into_iter().map(Record::new).collect())
    }

    fn keys(groups: &[GroupDescriptor<'_>]) -> Vec<String> {
        groups.iter().map(|g| g.key.clone()).collect()
    }

    fn ids_of(group: &GroupDescriptor<'_>) -> Vec<String> {
        group
            .objects
            .iter()
            .map(|r| eprint_id(r).unwrap_or_default())
            .collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_record_set() {
        let agg = aggregator(vec![]);
        assert!(agg.aggregate_people().is_empty());
        assert!(agg.aggregate_year().is_empty());
        assert!(agg.aggregate_event().is_empty());
        assert!(agg.aggregate_ids().unwrap().is_empty());
        assert!(agg.aggregate_latest_as_of(date("2024-01-12")).is_empty());
    }

    #[test]
    fn test_people_non_exclusive() {
        let agg = aggregator(vec![
            json!({"eprint_id": "1", "creators": [
                {"id": "Smith-A", "display_name": "Alice Smith"},
                {"id": "Jones-B", "display_name": "Bob Jones"}
            ]}),
            json!({"eprint_id": "2", "creators": [{"display_name": "Unknown"}]}),
            json!({"eprint_id": "3", "creators": [{"id": "Smith-A", "display_name": "A. Smith"}]}),
        ]);

        let groups = agg.aggregate_people();
        assert_eq!(keys(&groups), vec!["Smith-A", "Jones-B"]);

        // First display name wins
        assert_eq!(groups[0].label, "Alice Smith");
        assert_eq!(groups[0].extra("people_id"), Some("Smith-A"));
        assert_eq!(ids_of(&groups[0]), vec!["1", "3"]);
        assert_eq!(ids_of(&groups[1]), vec!["1"]);
    }

    #[test]
    fn test_people_skips_creator_without_display_name() {
        let agg = aggregator(vec![json!({"creators": [
            {"id": "Solo-X"},
            {"id": "Named-Y", "display_name": "Named"}
        ]})]);

        let groups = agg.aggregate_people();
        assert_eq!(keys(&groups), vec!["Named-Y"]);
    }

    #[test]
    fn test_people_aliases_match() {
        let agg = aggregator(vec![json!({"creators": [{"id": "A", "display_name": "A"}]})]);
        assert_eq!(agg.aggregate_person(), agg.aggregate_people());
        assert_eq!(agg.aggregate_person_az(), agg.aggregate_people());
        assert_eq!(agg.aggregate_author(), agg.aggregate_people());
    }

    #[test]
    fn test_year_descending() {
        let agg = aggregator(vec![
            json!({"date": "2020-03-01"}),
            json!({"date": "2019"}),
            json!({"date": "2021-12-31"}),
            json!({"title": "undated"}),
        ]);
        let groups = agg.aggregate_year();
        assert_eq!(keys(&groups), vec!["2021", "2020", "2019"]);
        assert_eq!(groups[0].extra("year"), Some("2021"));
    }

    #[test]
    fn test_publication_slug_and_label() {
        let agg = aggregator(vec![
            json!({"publication": "Physical Review B", "date": "2001"}),
            json!({"publication": "Annals/Letters"}),
            json!({"title": "no venue"}),
        ]);
        let groups = agg.aggregate_publication();
        assert_eq!(keys(&groups), vec!["Annals_Letters", "Physical_Review_B"]);
        assert_eq!(groups[1].label, "Physical Review B");
        assert_eq!(groups[1].extra("year"), Some("2001"));
        assert_eq!(groups[0].extra("year"), Some(""));
    }

    #[test]
    fn test_publication_variants_sharing_a_slug_merge() {
        let agg = aggregator(vec![
            json!({"publication": "A B"}),
            json!({"publication": "A/B"}),
        ]);
        let groups = agg.aggregate_publication();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "A B");
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_issn_ascending() {
        let agg = aggregator(vec![
            json!({"issn": "2000-0001"}),
            json!({"issn": "1000-0002"}),
            json!({"issn": "2000-0001"}),
        ]);
        let groups = agg.aggregate_issn();
        assert_eq!(keys(&groups), vec!["1000-0002", "2000-0001"]);
        assert_eq!(groups[1].count, 2);
    }

    #[test]
    fn test_collection() {
        let agg = aggregator(vec![
            json!({"collection": "Oral Histories"}),
            json!({"collection": "Archives"}),
        ]);
        let groups = agg.aggregate_collection();
        assert_eq!(keys(&groups), vec!["Archives", "Oral_Histories"]);
    }

    #[test]
    fn test_event_groups_missing_title_under_empty_key() {
        let agg = aggregator(vec![
            json!({"eprint_id": "1", "event_title": "Solar Workshop"}),
            json!({"eprint_id": "2"}),
            json!({"eprint_id": "3", "event_title": " Annual Meeting"}),
        ]);
        let groups = agg.aggregate_event();
        assert_eq!(keys(&groups), vec!["", "_Annual_Meeting", "Solar_Workshop"]);
        assert_eq!(groups[0].label, "");
        assert_eq!(ids_of(&groups[0]), vec!["2"]);
    }

    #[test]
    fn test_subjects_resolve_and_skip_unknown() {
        let subjects: SubjectMap = [("bio", "Biology"), ("ast", "Astronomy")]
            .into_iter()
            .collect();
        let agg = aggregator(vec![
            json!({"eprint_id": "1", "subjects": {"items": ["bio", "zzz"]}}),
            json!({"eprint_id": "2", "subjects": {"items": ["ast", "bio"]}}),
            json!({"eprint_id": "3", "subjects": {"items": ["zzz"]}}),
        ]);

        let groups = agg.aggregate_subjects(&subjects);
        assert_eq!(keys(&groups), vec!["ast", "bio"]);
        assert_eq!(groups[0].label, "Astronomy");
        assert_eq!(groups[1].extra("subject_name"), Some("Biology"));
        assert_eq!(ids_of(&groups[1]), vec!["1", "2"]);
    }

    #[test]
    fn test_ids_numeric_order() {
        let agg = aggregator(vec![
            json!({"eprint_id": "10"}),
            json!({"eprint_id": "2"}),
            json!({"eprint_id": 33}),
        ]);
        let groups = agg.aggregate_ids().unwrap();
        assert_eq!(keys(&groups), vec!["2", "10", "33"]);
        assert_eq!(groups[2].extra("eprint_id"), Some("33"));
    }

    #[test]
    fn test_ids_duplicates_merge() {
        let agg = aggregator(vec![json!({"eprint_id": "5"}), json!({"eprint_id": "5"})]);
        let groups = agg.aggregate_ids().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 2);
    }

    #[test]
    fn test_ids_malformed_key_fails() {
        let agg = aggregator(vec![json!({"eprint_id": "10"}), json!({"eprint_id": "ten"})]);
        let err = agg.aggregate_ids().unwrap_err();
        assert_eq!(err.code(), AggregateErrorCode::MalformedKey);
        assert_eq!(err.subject(), "ten");
    }

    #[test]
    fn test_types_label() {
        let agg = aggregator(vec![
            json!({"type": "conference_item"}),
            json!({"type": "article"}),
            json!({"title": "untyped"}),
        ]);
        let groups = agg.aggregate_types();
        assert_eq!(keys(&groups), vec!["article", "conference_item"]);
        assert_eq!(groups[1].label, "Conference Item");
        assert_eq!(groups[1].extra("type"), Some("conference_item"));
    }

    #[test]
    fn test_latest_window() {
        let agg = aggregator(vec![
            json!({"eprint_id": "1", "lastmod": "2024-01-10T00:00:00Z"}),
            json!({"eprint_id": "2", "lastmod": "2023-01-01T00:00:00Z"}),
            json!({"eprint_id": "3", "lastmod": "2024-01-10T09:30:00Z"}),
            json!({"eprint_id": "4", "lastmod": "2024-01-05T23:59:59Z"}),
            json!({"eprint_id": "5", "lastmod": "2024-01-04T23:59:59Z"}),
            json!({"eprint_id": "6", "lastmod": ""}),
        ]);

        let groups = agg.aggregate_latest_as_of(date("2024-01-12"));
        assert_eq!(
            keys(&groups),
            vec![
                "2024-01-10T09:30:00Z",
                "2024-01-10T00:00:00Z",
                "2024-01-05T23:59:59Z"
            ]
        );
        assert_eq!(groups[0].label, "2024-01-10");
    }

    #[test]
    fn test_latest_uses_pinned_today() {
        let agg = aggregator(vec![json!({"lastmod": "2024-01-10T00:00:00Z"})])
            .with_today(date("2024-01-12"));
        assert_eq!(agg.aggregate_latest().len(), 1);
    }

    #[test]
    fn test_dispatch_subjects_without_directory() {
        let agg = aggregator(vec![json!({"subjects": {"items": ["bio"]}})]);
        let groups = agg.aggregate(FacetKind::Subjects, None).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_aggregate_views_builds_each_facet_once() {
        let agg = aggregator(vec![json!({
            "eprint_id": "1",
            "date": "2020",
            "creators": [{"id": "A", "display_name": "A"}]
        })]);
        let views: Vec<FacetKind> = ["person", "year", "person-az", "author"]
            .into_iter()
            .map(|name| FacetKind::from_view(name).unwrap())
            .collect();
        let built = agg.aggregate_views(&views, None).unwrap();
        assert_eq!(built.keys().copied().collect::<Vec<_>>(), vec!["person", "year"]);
        assert_eq!(built["person"][0].key, "A");
    }

    #[test]
    fn test_aggregate_views_propagates_malformed_key() {
        let agg = aggregator(vec![json!({"eprint_id": "x"})]);
        let err = agg
            .aggregate_views(&[FacetKind::Year, FacetKind::Ids], None)
            .unwrap_err();
        assert_eq!(err.code(), AggregateErrorCode::MalformedKey);
    }
}
