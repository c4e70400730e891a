use std::collections::BTreeSet;

use super::*;
use crate::model::{ApiDiskUsage, DiskUsage};
use crate::test_support::{case, collection, collector};

fn guids<T: Entity>(items: &[T]) -> Vec<&str> {
    items.iter().map(|i| i.guid()).collect()
}

#[test]
fn newest_first_with_undated_last() {
    let mut cases = vec![
        case("t1", "one", "2024-01-01T00:00:00Z"),
        case("none", "undated", ""),
        case("t3", "three", "2024-03-01T00:00:00Z"),
        case("t2", "two", "2024-02-01T00:00:00+02:00"),
    ];
    sort_newest_first(&mut cases);
    assert_eq!(guids(&cases), vec!["t3", "t2", "t1", "none"]);
}

#[test]
fn closed_cases_follow_open_ones() {
    let mut closed = case("t3", "three", "2024-03-01T00:00:00Z");
    closed.closed = Some("2024-04-01T00:00:00Z".to_string());
    let cases = vec![
        case("t1", "one", "2024-01-01T00:00:00Z"),
        closed,
        case("t2", "two", "2024-02-01T00:00:00Z"),
    ];

    let order: Vec<&str> = case_display_order(&cases, None)
        .iter()
        .map(|c| c.guid.as_str())
        .collect();
    assert_eq!(order, vec!["t2", "t1", "t3"]);

    let mut reopened = cases.clone();
    reopened[1].closed = Some(String::new());
    let order: Vec<&str> = case_display_order(&reopened, None)
        .iter()
        .map(|c| c.guid.as_str())
        .collect();
    assert_eq!(order, vec!["t3", "t2", "t1"]);
}

#[test]
fn search_matches_name_description_and_tsid() {
    let mut a = case("g-a", "Phishing Wave", "2024-01-01T00:00:00Z");
    a.tsid = Some("TS-1042".to_string());
    let mut b = case("g-b", "Ransomware", "2024-02-01T00:00:00Z");
    b.description = Some("ACME phishing follow-up".to_string());
    let c = case("g-c", "Insider", "2024-03-01T00:00:00Z");
    let cases = vec![a, b, c];

    let names = |q: &str| -> Vec<String> {
        case_display_order(&cases, Some(q))
            .iter()
            .map(|c| c.name.clone())
            .collect()
    };
    assert_eq!(names("PHISHING"), vec!["Phishing Wave", "Ransomware"]);
    assert_eq!(names("ts-10"), vec!["Phishing Wave"]);
    assert_eq!(names("nothing"), Vec::<String>::new());
    assert_eq!(names("   ").len(), 3);
}

#[test]
fn orphan_status_tracks_current_collectors() {
    let mut view = CaseView::new(case("c1", "case", "2024-01-01T00:00:00Z"));
    view.set_collectors(vec![collector("k2", Some("F2"), "2024-01-01T00:00:00Z")]);
    let col = collection("col", Some("F1"), "2024-01-02T00:00:00Z");
    view.set_collections(vec![col.clone()]);

    assert!(view.is_orphaned(&col));
    view.insert_collector(collector("k1", Some("F1"), "2024-01-03T00:00:00Z"));
    assert!(!view.is_orphaned(&col));
    view.remove_collector("k1");
    assert!(view.is_orphaned(&col));

    let unfingerprinted = collection("bare", None, "2024-01-02T00:00:00Z");
    assert!(view.is_orphaned(&unfingerprinted));
}

#[test]
fn inserts_resort_and_replace_keeps_open_tab_in_sync() {
    let mut view = CaseView::new(case("c1", "case", "2024-01-01T00:00:00Z"));
    view.set_collections(vec![
        collection("old", Some("F"), "2024-01-01T00:00:00Z"),
        collection("mid", Some("F"), "2024-02-01T00:00:00Z"),
    ]);
    view.insert_collection(collection("new", Some("F"), "2024-03-01T00:00:00Z"));
    assert_eq!(guids(view.collections()), vec!["new", "mid", "old"]);

    assert!(view.open_collection("mid"));
    assert_eq!(view.selected(), Some("mid"));
    let mut edited = collection("mid", Some("F"), "2024-02-01T00:00:00Z");
    edited.description = "edited".to_string();
    assert!(view.replace_collection(edited));
    assert_eq!(view.opened()[0].description, "edited");
    assert_eq!(view.collections()[1].description, "edited");
    assert_eq!(guids(view.collections()), vec!["new", "mid", "old"]);
}

#[test]
fn removing_collection_closes_its_tab() {
    let mut view = CaseView::new(case("c1", "case", "2024-01-01T00:00:00Z"));
    view.set_collections(vec![
        collection("a", Some("F"), "2024-01-01T00:00:00Z"),
        collection("b", Some("F"), "2024-02-01T00:00:00Z"),
    ]);
    view.open_collection("a");
    view.open_collection("b");
    assert_eq!(view.selected(), Some("b"));

    assert!(view.remove_collection("b"));
    assert_eq!(guids(view.opened()), vec!["a"]);
    assert_eq!(view.selected(), Some("a"));
    assert!(view.collection("b").is_none());
    assert!(!view.open_collection("b"));
}

#[test]
fn stale_tickets_are_rejected() {
    let mut mirror = Mirror::default();
    mirror.install_view(case("c1", "case", "2024-01-01T00:00:00Z"));

    let view = mirror.view_ticket();
    let first = mirror.begin(Section::Collectors);
    let second = mirror.begin(Section::Collectors);
    let cases = mirror.begin(Section::Cases);
    assert!(!mirror.accepts(&first));
    assert!(mirror.accepts(&second));
    assert!(mirror.accepts(&view));

    mirror.close_view();
    assert!(mirror.view().is_none());
    assert!(!mirror.accepts(&second));
    assert!(!mirror.accepts(&view));
    assert!(mirror.accepts(&cases));
    assert!(mirror.accepts(&mirror.index_ticket()));
}

#[test]
fn unseen_cases_are_flagged_once() {
    let mut index = CaseIndex::default();
    index.restore_seen(BTreeSet::from(["a".to_string()]));
    index.set_cases(vec![
        case("a", "A", "2024-01-01T00:00:00Z"),
        case("b", "B", "2024-02-01T00:00:00Z"),
    ]);
    let flags: Vec<(String, bool)> = index
        .summaries(None)
        .into_iter()
        .map(|s| (s.case.guid, s.unseen_new))
        .collect();
    assert_eq!(flags, vec![("b".to_string(), true), ("a".to_string(), false)]);
    assert_eq!(index.seen().len(), 2);

    index.set_cases(index.cases().to_vec());
    assert!(index.summaries(None).iter().all(|s| !s.unseen_new));

    index.insert(case("c", "C", "2024-03-01T00:00:00Z"));
    assert!(index.seen().contains("c"));
    assert_eq!(index.cases()[0].guid, "c");
}

#[test]
fn summaries_carry_usage_shares() {
    let mut index = CaseIndex::default();
    index.set_cases(vec![
        case("a", "A", "2024-01-01T00:00:00Z"),
        case("b", "B", "2024-02-01T00:00:00Z"),
    ]);
    index.set_usage(&ApiDiskUsage {
        cases: vec![DiskUsage {
            guid: "a".to_string(),
            collectors: 2,
            collections: 3,
            analyses: 5,
        }],
        updated: "2024-03-01T00:00:00Z".to_string(),
    });

    let summaries = index.summaries(None);
    let a = summaries.iter().find(|s| s.case.guid == "a").unwrap();
    assert_eq!(a.total, 10);
    assert_eq!(a.quota.collectors, 20.0);
    assert_eq!(a.quota.collections, 30.0);
    assert_eq!(a.quota.analyses, 50.0);
    let b = summaries.iter().find(|s| s.case.guid == "b").unwrap();
    assert_eq!(b.total, 0);
    assert_eq!(b.quota, UsageShare::default());

    let report = index.usage_report(1_000);
    assert_eq!(report.total, 10);
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.quota, 1_000);
}

#[test]
fn forgetting_open_case_closes_view() {
    let mut mirror = Mirror::default();
    mirror.index_mut().set_cases(vec![case("c1", "case", "2024-01-01T00:00:00Z")]);
    mirror.install_view(case("c1", "case", "2024-01-01T00:00:00Z"));

    let mut renamed = case("c1", "renamed", "2024-01-01T00:00:00Z");
    renamed.closed = Some("2024-05-01T00:00:00Z".to_string());
    mirror.replace_case(renamed);
    assert_eq!(mirror.view().unwrap().case().name, "renamed");
    assert_eq!(mirror.index().cases()[0].name, "renamed");

    mirror.forget_case("c1");
    assert!(mirror.view().is_none());
    assert!(mirror.index().cases().is_empty());
}

#[test]
fn case_menu_depends_on_closed_state() {
    let open = case("c1", "case", "2024-01-01T00:00:00Z");
    let items: Vec<(CaseAction, bool)> = case_menu(&open)
        .iter()
        .map(|i| (i.action, i.enabled))
        .collect();
    assert_eq!(
        items,
        vec![
            (CaseAction::CopyGuid, true),
            (CaseAction::Edit, true),
            (CaseAction::Close, true),
            (CaseAction::Delete, true),
        ]
    );

    let mut closed = open.clone();
    closed.closed = Some("2024-02-01T00:00:00Z".to_string());
    let items = case_menu(&closed);
    assert!(!items[1].enabled);
    assert_eq!(items[2].action, CaseAction::Reopen);
}
