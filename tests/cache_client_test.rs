mod common;

use chrono::Utc;
use uuid::Uuid;

use talentflow::cache::CacheKey;
use talentflow::chaos::Chaos;
use talentflow::client::CachedClient;
use talentflow::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload};
use talentflow::dto::job_dto::{CreateJobPayload, JobListQuery};
use talentflow::models::candidate::{Candidate, Stage, TimelineEvent};
use talentflow::models::job::{Job, JobStatus};

use common::{test_state, test_state_with_chaos};

fn job_payload(slug: &str) -> CreateJobPayload {
    CreateJobPayload {
        title: format!("Job {}", slug),
        slug: slug.to_string(),
        description: None,
        department: None,
        location: None,
        employment_type: None,
        tags: Vec::new(),
        status: None,
        order: None,
    }
}

fn candidate_payload(name: &str, email: &str) -> CreateCandidatePayload {
    CreateCandidatePayload {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        avatar: None,
        job_id: None,
        stage: None,
        resume_url: None,
        linkedin_url: None,
        notes: None,
    }
}

fn make_job(slug: &str, order: i64) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: format!("Job {}", slug),
        slug: slug.to_string(),
        description: None,
        department: None,
        location: None,
        employment_type: None,
        tags: Vec::new(),
        status: JobStatus::Active,
        order,
        created_at: Utc::now(),
    }
}

fn make_candidate(name: &str, email: &str) -> Candidate {
    Candidate {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        avatar: None,
        job_id: None,
        stage: Stage::Applied,
        resume_url: None,
        linkedin_url: None,
        notes: None,
        timeline: vec![TimelineEvent::stage_change(Stage::Applied)],
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn list_serves_from_cache_until_invalidated() {
    let state = test_state().await;
    let client = CachedClient::new(state.clone());

    client.create_job(&job_payload("first")).await.unwrap();
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);

    // A record slipped in behind the client's back is invisible while the
    // cached entry stays fresh.
    state.dataset.put_job(make_job("sneaky", 5)).await;
    let cached = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(cached.total, 1);

    client.cache().invalidate_prefix("/api/jobs");
    let refreshed = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(refreshed.total, 2);
}

#[tokio::test]
async fn successful_mutation_invalidates_job_queries() {
    let state = test_state().await;
    let client = CachedClient::new(state);

    client.create_job(&job_payload("one")).await.unwrap();
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);

    client.create_job(&job_payload("two")).await.unwrap();
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn optimistic_reorder_commits_and_refetches() {
    let state = test_state().await;
    let client = CachedClient::new(state);

    let first = client.create_job(&job_payload("a")).await.unwrap();
    client.create_job(&job_payload("b")).await.unwrap();
    client.create_job(&job_payload("c")).await.unwrap();

    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.items[0].id, first.id);

    let reordered = client.reorder_job(first.id, 10).await.unwrap();
    assert_eq!(reordered.order, 10);

    // Commit marks touched entries stale, so the next read refetches.
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.items.last().unwrap().id, first.id);
}

#[tokio::test]
async fn failed_reorder_rolls_back_cached_views() {
    let state = test_state_with_chaos(Chaos::always_fail()).await;
    let client = CachedClient::new(state.clone());

    let job_a = make_job("a", 0);
    let job_b = make_job("b", 1);
    state.dataset.put_job(job_a.clone()).await;
    state.dataset.put_job(job_b.clone()).await;

    // Reads are not failure-injected, so the cache warms normally.
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.items[0].id, job_a.id);

    let result = client.reorder_job(job_a.id, 10).await;
    assert!(result.is_err());

    // The snapshot was restored verbatim and stays servable.
    let key = CacheKey::new("/api/jobs", JobListQuery::default().params());
    assert!(client.cache().get(&key).is_some());
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.items[0].id, job_a.id);
    assert_eq!(page.items[0].order, 0);
}

#[tokio::test]
async fn optimistic_stage_change_commits() {
    let state = test_state().await;
    let client = CachedClient::new(state);

    let created = client
        .create_candidate(&candidate_payload("Ada", "ada@example.com"))
        .await
        .unwrap();
    client
        .list_candidates(&CandidateListQuery::default())
        .await
        .unwrap();

    let updated = client
        .update_candidate_stage(created.id, Stage::Screening)
        .await
        .unwrap();
    assert_eq!(updated.stage, Stage::Screening);
    assert_eq!(updated.timeline.len(), 2);

    let page = client
        .list_candidates(&CandidateListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].stage, Stage::Screening);
}

#[tokio::test]
async fn failed_stage_change_rolls_back_cached_views() {
    let state = test_state_with_chaos(Chaos::always_fail()).await;
    let client = CachedClient::new(state.clone());

    let candidate = make_candidate("Grace", "grace@example.com");
    state.dataset.put_candidate(candidate.clone()).await;

    let page = client
        .list_candidates(&CandidateListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].stage, Stage::Applied);

    let result = client.update_candidate_stage(candidate.id, Stage::Offer).await;
    assert!(result.is_err());

    let key = CacheKey::new("/api/candidates", CandidateListQuery::default().params());
    assert!(client.cache().get(&key).is_some());
    let page = client
        .list_candidates(&CandidateListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].stage, Stage::Applied);
    assert_eq!(page.items[0].timeline.len(), 1);
}

#[tokio::test]
async fn seed_from_store_preloads_default_queries() {
    let state = test_state().await;
    for i in 0..3 {
        state
            .store
            .upsert_job(&make_job(&format!("stored-{}", i), i))
            .await
            .unwrap();
    }

    let client = CachedClient::new(state.clone());
    client.seed_from_store(&state.store).await.unwrap();

    // The session dataset is empty, so this page can only have come from
    // the seeded cache entry.
    let page = client.list_jobs(&JobListQuery::default()).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
}
