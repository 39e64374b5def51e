//! Tests for the orchestrator state machine.
//!
//! Pure message-in/command-out tests: no runtime, no network. Fetch
//! resolution is simulated by feeding `PageResolved` messages tagged the
//! way the shell would tag them.

use super::*;
use crate::api::ReadmeApi;
use crate::engine::SearchOutcome;
use crate::model::ResultPage;
use crate::test_support::{page_for, text_filters, StubReadmeApi};

/// Commit `filters` and return the generation the fetch was tagged with.
fn commit(orch: &mut Orchestrator, filters: &FilterSet) -> u64 {
    match orch.update(Msg::CommitFilters(filters.clone())) {
        Cmd::FetchPage {
            generation,
            filters: f,
            page,
        } => {
            assert_eq!(&f, filters);
            assert_eq!(page, 1);
            generation
        }
        other => panic!("commit must emit a page-1 fetch, got {other:?}"),
    }
}

fn resolve_page(orch: &mut Orchestrator, generation: u64, page: ResultPage) -> Cmd {
    orch.update(Msg::PageResolved {
        generation,
        outcome: Ok(SearchOutcome::Page(page)),
    })
}

// ===== Commit =====

#[test]
fn commit_starts_loading_epoch_at_page_one() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");

    commit(&mut orch, &filters);

    assert_eq!(orch.session().filters, filters);
    assert_eq!(orch.session().next_page, 1);
    assert!(orch.session().status.is_loading());
    assert_eq!(orch.session().result_count(), 0);
}

#[test]
fn commit_clears_results_before_any_new_page_merges() {
    let mut orch = Orchestrator::new();
    let old = text_filters("raft");
    let generation = commit(&mut orch, &old);
    resolve_page(&mut orch, generation, page_for(&old, 1, 1..=10));
    assert_eq!(orch.session().result_count(), 10);

    let new = text_filters("paxos");
    commit(&mut orch, &new);

    assert_eq!(orch.session().result_count(), 0, "reset happens at commit, not at first merge");
    assert_eq!(orch.session().next_page, 1);
}

#[test]
fn commit_is_allowed_from_any_state() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);
    orch.update(Msg::PageResolved {
        generation,
        outcome: Err(SearchError::TimedOut),
    });
    assert!(matches!(orch.session().status, SessionStatus::Errored(_)));

    // Errored -> Loading via a fresh commit.
    commit(&mut orch, &text_filters("paxos"));
    assert!(orch.session().status.is_loading());
}

// ===== Page resolution =====

#[test]
fn full_page_merges_and_returns_to_idle() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);

    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=10));

    assert_eq!(orch.session().result_count(), 10);
    assert!(orch.session().status.is_idle());
}

#[test]
fn short_page_marks_session_exhausted() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);

    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=4));

    assert_eq!(orch.session().result_count(), 4);
    assert_eq!(orch.session().status, SessionStatus::Exhausted);
}

#[test]
fn response_from_superseded_generation_is_discarded() {
    // A commit lands while the previous epoch's fetch is still in flight:
    // the late response must not leak into the new epoch's results.
    let mut orch = Orchestrator::new();
    let old = text_filters("raft");
    let old_generation = commit(&mut orch, &old);

    let new = text_filters("paxos");
    let new_generation = commit(&mut orch, &new);

    resolve_page(&mut orch, old_generation, page_for(&old, 1, 1..=10));
    assert_eq!(orch.session().result_count(), 0, "stale page discarded");
    assert!(orch.session().status.is_loading(), "still waiting for the new epoch's page");

    resolve_page(&mut orch, new_generation, page_for(&new, 1, 50..=59));
    let ids: Vec<u64> = orch.session().records().iter().map(|r| r.id.get()).collect();
    assert_eq!(ids, (50..=59).collect::<Vec<_>>(), "results reflect only the new filters");
}

#[test]
fn page_tagged_with_stale_filters_is_never_merged() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);

    // Same generation but a mismatched filter tag (cannot normally happen;
    // the check is the contract).
    resolve_page(&mut orch, generation, page_for(&text_filters("other"), 1, 1..=10));

    assert_eq!(orch.session().result_count(), 0);
}

#[test]
fn superseded_outcome_is_a_silent_noop() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);

    let cmd = orch.update(Msg::PageResolved {
        generation,
        outcome: Ok(SearchOutcome::Superseded),
    });

    assert_eq!(cmd, Cmd::None);
    assert!(orch.session().status.is_loading(), "the trailing call will resolve the status");
}

#[test]
fn failure_sets_errored_and_emits_no_retry() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);

    let cmd = orch.update(Msg::PageResolved {
        generation,
        outcome: Err(SearchError::Network {
            reason: "connection reset".to_string(),
        }),
    });

    assert_eq!(cmd, Cmd::None, "no automatic retry");
    assert!(matches!(orch.session().status, SessionStatus::Errored(_)));
}

// ===== Scroll advance =====

#[test]
fn scroll_advance_fetches_next_page_with_same_filters() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);
    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=10));

    let cmd = orch.update(Msg::ScrollAdvance);

    assert_eq!(
        cmd,
        Cmd::FetchPage {
            generation,
            filters: filters.clone(),
            page: 2,
        }
    );
    assert_eq!(orch.session().next_page, 2);
    assert!(orch.session().status.is_loading());
}

#[test]
fn scroll_advance_is_ignored_unless_idle() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    commit(&mut orch, &filters);
    assert!(orch.session().status.is_loading());

    let cmd = orch.update(Msg::ScrollAdvance);

    assert_eq!(cmd, Cmd::None);
    assert_eq!(orch.session().next_page, 1, "cursor untouched while loading");
}

#[test]
fn scroll_advance_is_ignored_before_the_first_commit() {
    // A fresh session is idle but has no epoch; the sentinel being visible
    // on an empty screen must not fetch page 2 of nothing.
    let mut orch = Orchestrator::new();
    assert_eq!(orch.update(Msg::ScrollAdvance), Cmd::None);
    assert_eq!(orch.observe_sentinel(true), Cmd::None);
    assert_eq!(orch.session().next_page, 1);
}

#[test]
fn sentinel_observation_drives_pagination_once_per_transition() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);
    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=10));

    let cmd = orch.observe_sentinel(true);
    assert!(matches!(cmd, Cmd::FetchPage { page: 2, .. }));

    // Still visible, now loading: no double fire.
    assert_eq!(orch.observe_sentinel(true), Cmd::None);

    // Page 2 resolves full; the sentinel is still visible and the status
    // change re-armed the trigger, so the next observation fires page 3.
    resolve_page(&mut orch, generation, page_for(&filters, 2, 11..=20));
    let cmd = orch.observe_sentinel(true);
    assert!(matches!(cmd, Cmd::FetchPage { page: 3, .. }));
}

#[test]
fn sentinel_never_fires_once_exhausted() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);
    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=3));
    assert_eq!(orch.session().status, SessionStatus::Exhausted);

    assert_eq!(orch.observe_sentinel(true), Cmd::None);
    assert_eq!(orch.observe_sentinel(false), Cmd::None);
    assert_eq!(orch.observe_sentinel(true), Cmd::None);
}

// ===== Two-page walkthrough =====

#[test]
fn two_page_scenario_accumulates_fourteen_then_exhausts() {
    // commit {text:"raft", language:"go"} -> page 1 of 10 -> scroll ->
    // page 2 of 4 new -> 14 entries, Exhausted.
    let mut orch = Orchestrator::new();
    let mut filters = text_filters("raft");
    filters.language = Some("go".to_string());

    let generation = commit(&mut orch, &filters);
    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=10));
    assert_eq!(orch.session().result_count(), 10);
    assert!(orch.session().status.is_idle());

    let cmd = orch.observe_sentinel(true);
    assert!(matches!(cmd, Cmd::FetchPage { page: 2, .. }));
    resolve_page(&mut orch, generation, page_for(&filters, 2, 11..=14));

    assert_eq!(orch.session().result_count(), 14);
    assert_eq!(orch.session().status, SessionStatus::Exhausted);
}

// ===== Retry =====

#[test]
fn retry_recommits_current_filters_only_when_errored() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);

    // Idle: retry is a no-op.
    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=10));
    assert_eq!(orch.update(Msg::Retry), Cmd::None);

    // Errored: retry starts a fresh epoch with the same filters.
    let cmd = orch.update(Msg::ScrollAdvance);
    let generation = match cmd {
        Cmd::FetchPage { generation, .. } => generation,
        other => panic!("expected fetch, got {other:?}"),
    };
    orch.update(Msg::PageResolved {
        generation,
        outcome: Err(SearchError::TimedOut),
    });

    match orch.update(Msg::Retry) {
        Cmd::FetchPage {
            generation: retry_generation,
            filters: retry_filters,
            page,
        } => {
            assert_eq!(retry_filters, filters);
            assert_eq!(page, 1);
            assert!(retry_generation > generation, "retry is a new epoch");
        }
        other => panic!("expected fetch, got {other:?}"),
    }
    assert!(orch.session().status.is_loading());
}

// ===== README wiring =====

#[test]
fn open_readme_emits_fetch_for_key() {
    let mut orch = Orchestrator::new();

    let cmd = orch.update(Msg::OpenReadme {
        owner: "torvalds".to_string(),
        repo: "linux".to_string(),
    });

    assert_eq!(
        cmd,
        Cmd::FetchReadme {
            key: DocumentKey::new("torvalds", "linux"),
        }
    );
    assert_eq!(orch.viewer().status(), &crate::engine::DocumentStatus::Loading);
}

#[test]
fn readme_resolution_after_close_does_not_reopen() {
    let mut orch = Orchestrator::new();
    let key = match orch.update(Msg::OpenReadme {
        owner: "torvalds".to_string(),
        repo: "linux".to_string(),
    }) {
        Cmd::FetchReadme { key } => key,
        other => panic!("expected readme fetch, got {other:?}"),
    };
    orch.update(Msg::CloseReadme);

    orch.update(Msg::ReadmeResolved {
        key,
        result: Ok("# Linux".to_string()),
    });

    assert_eq!(orch.viewer().status(), &crate::engine::DocumentStatus::Idle);
    assert!(!orch.viewer().is_open());
}

#[tokio::test]
async fn readme_round_trip_through_the_collaborator() {
    // The shell's dispatch in miniature: run the emitted fetch against the
    // stub and feed the resolution back in.
    let mut orch = Orchestrator::new();
    let api = StubReadmeApi::new();
    api.enqueue(Ok("# tokio\n\nAn async runtime.".to_string()));

    let key = match orch.update(Msg::OpenReadme {
        owner: "tokio-rs".to_string(),
        repo: "tokio".to_string(),
    }) {
        Cmd::FetchReadme { key } => key,
        other => panic!("expected readme fetch, got {other:?}"),
    };
    let result = api.fetch_readme(&key.owner, &key.repo).await;
    orch.update(Msg::ReadmeResolved {
        key,
        result,
    });

    assert_eq!(orch.viewer().status(), &crate::engine::DocumentStatus::Shown);
    assert_eq!(
        orch.viewer().markdown(),
        Some("# tokio\n\nAn async runtime.")
    );
    assert_eq!(
        api.calls(),
        vec![("tokio-rs".to_string(), "tokio".to_string())]
    );
}

#[test]
fn readme_failure_does_not_disturb_search_results() {
    let mut orch = Orchestrator::new();
    let filters = text_filters("raft");
    let generation = commit(&mut orch, &filters);
    resolve_page(&mut orch, generation, page_for(&filters, 1, 1..=10));

    let key = match orch.update(Msg::OpenReadme {
        owner: "owner1".to_string(),
        repo: "repo1".to_string(),
    }) {
        Cmd::FetchReadme { key } => key,
        other => panic!("expected readme fetch, got {other:?}"),
    };
    orch.update(Msg::ReadmeResolved {
        key,
        result: Err(crate::model::ReadmeError::Backend { status: 404 }),
    });

    assert!(matches!(
        orch.viewer().status(),
        crate::engine::DocumentStatus::Errored(_)
    ));
    assert_eq!(orch.session().result_count(), 10, "result list untouched");
    assert!(orch.session().status.is_idle());
}
