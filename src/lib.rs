pub mod cache;
pub mod chaos;
pub mod client;
pub mod config;
pub mod dataset;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod store;

use crate::chaos::Chaos;
use crate::dataset::Dataset;
use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    job_service::JobService,
};
use crate::store::DurableStore;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub store: DurableStore,
    pub chaos: Chaos,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub assessment_service: AssessmentService,
}

impl AppState {
    pub fn new(dataset: Dataset, store: DurableStore, chaos: Chaos) -> Self {
        let job_service = JobService::new(dataset.clone(), store.clone());
        let candidate_service = CandidateService::new(dataset.clone(), store.clone());
        let assessment_service = AssessmentService::new(dataset.clone(), store.clone());

        Self {
            dataset,
            store,
            chaos,
            job_service,
            candidate_service,
            assessment_service,
        }
    }
}
