//! Session seed data for the simulated backend, generated fresh on every
//! startup. The durable store accumulates its copy through the normal
//! write-through path.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::models::assessment::{Assessment, AssessmentSection, Question, QuestionType};
use crate::models::candidate::{Candidate, Stage, TimelineEvent, TimelineEventKind};
use crate::models::job::{Job, JobStatus};

const JOB_TITLES: &[&str] = &[
    "Senior Frontend Engineer",
    "Backend Developer",
    "Full Stack Engineer",
    "DevOps Engineer",
    "Product Manager",
    "UX Designer",
    "Data Scientist",
    "Marketing Manager",
    "Sales Representative",
    "Customer Success Manager",
    "QA Engineer",
    "Mobile Developer",
    "System Administrator",
    "Technical Writer",
    "Business Analyst",
];

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Product",
    "Design",
    "Marketing",
    "Sales",
    "Operations",
];

const LOCATIONS: &[&str] = &[
    "Remote",
    "San Francisco",
    "New York",
    "London",
    "Berlin",
    "Tokyo",
];

const EMPLOYMENT_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Intern"];

const TAGS: &[&str] = &[
    "JavaScript",
    "React",
    "Node.js",
    "Python",
    "AWS",
    "Docker",
    "Kubernetes",
    "TypeScript",
    "Go",
    "PostgreSQL",
];

const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "William",
    "Mia", "James", "Charlotte", "Benjamin", "Amelia", "Lucas", "Harper", "Henry", "Evelyn",
    "Alexander", "Abigail", "Michael", "Emily", "Daniel", "Elizabeth", "Jacob", "Sofia", "Logan",
    "Avery", "Jackson",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson",
];

pub async fn seed_dataset(dataset: &Dataset, config: &Config) {
    let jobs = build_jobs(config.seed_jobs);
    let job_ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();
    let candidates = build_candidates(config.seed_candidates, &job_ids);
    let assessments = build_assessments(&job_ids);

    for job in jobs {
        dataset.put_job(job).await;
    }
    for candidate in candidates {
        dataset.put_candidate(candidate).await;
    }
    for assessment in assessments {
        dataset.put_assessment(assessment).await;
    }
}

fn build_jobs(count: usize) -> Vec<Job> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let id = Uuid::new_v4();
            let tag_count = rng.gen_range(2..=4);
            let tags = TAGS
                .choose_multiple(&mut rng, tag_count)
                .map(|t| t.to_string())
                .collect();
            Job {
                id,
                title: JOB_TITLES[i % JOB_TITLES.len()].to_string(),
                slug: format!("job-{}-{}", i + 1, &id.simple().to_string()[..6]),
                description: Some(
                    "We are looking for a talented professional to join our growing team."
                        .to_string(),
                ),
                department: DEPARTMENTS.choose(&mut rng).map(|d| d.to_string()),
                location: LOCATIONS.choose(&mut rng).map(|l| l.to_string()),
                employment_type: EMPLOYMENT_TYPES.choose(&mut rng).map(|e| e.to_string()),
                tags,
                status: if i % 5 == 0 {
                    JobStatus::Archived
                } else {
                    JobStatus::Active
                },
                order: i as i64,
                created_at: Utc::now(),
            }
        })
        .collect()
}

fn build_candidates(count: usize, job_ids: &[Uuid]) -> Vec<Candidate> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let id = Uuid::new_v4();
            let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Doe");
            let stage = *Stage::ALL.choose(&mut rng).unwrap_or(&Stage::Applied);
            let applied_at = Utc::now() - Duration::days(rng.gen_range(0..30));
            Candidate {
                id,
                name: format!("{} {}", first, last),
                email: format!("candidate{}@example.com", i),
                phone: Some(format!(
                    "+1 {}-{}-{}",
                    rng.gen_range(100..1000),
                    rng.gen_range(100..1000),
                    rng.gen_range(1000..10000)
                )),
                avatar: Some(format!(
                    "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                    id
                )),
                job_id: job_ids.choose(&mut rng).copied(),
                stage,
                resume_url: None,
                linkedin_url: None,
                notes: None,
                timeline: vec![TimelineEvent {
                    id: Uuid::new_v4(),
                    kind: TimelineEventKind::StageChange,
                    stage: Some(Stage::Applied),
                    note: None,
                    timestamp: applied_at,
                }],
                created_at: Utc::now() - Duration::days(rng.gen_range(0..60)),
            }
        })
        .collect()
}

fn build_assessments(job_ids: &[Uuid]) -> Vec<Assessment> {
    let templates = [
        (
            "Technical Assessment",
            "Evaluate technical skills and problem-solving abilities",
            vec!["Basics", "Deeper Dive"],
        ),
        (
            "Product Sense Assessment",
            "Evaluate product thinking and prioritization",
            vec!["Product Strategy"],
        ),
        (
            "Design Assessment",
            "Evaluate UX and visual design thinking",
            vec!["Design Principles"],
        ),
    ];

    templates
        .into_iter()
        .enumerate()
        .map(|(i, (title, description, sections))| Assessment {
            id: Uuid::new_v4(),
            job_id: job_ids.get(i).copied(),
            title: title.to_string(),
            description: Some(description.to_string()),
            sections: sections
                .into_iter()
                .map(|section_title| AssessmentSection {
                    id: Uuid::new_v4(),
                    title: section_title.to_string(),
                    questions: build_questions(),
                })
                .collect(),
            created_at: Utc::now(),
        })
        .collect()
}

fn build_questions() -> Vec<Question> {
    let relocation_id = Uuid::new_v4();
    vec![
        choice_question(
            QuestionType::Single,
            "Preferred language?",
            true,
            &["JS", "TS", "Python", "Go"],
        ),
        choice_question(
            QuestionType::Multiple,
            "Frameworks used",
            true,
            &["React", "Vue", "Angular", "Svelte", "Node"],
        ),
        text_question(QuestionType::ShortText, "Favorite tool", false, None),
        text_question(
            QuestionType::LongText,
            "Describe a hard bug you fixed",
            true,
            Some(800),
        ),
        Question {
            id: Uuid::new_v4(),
            question_type: QuestionType::Numeric,
            question: "Years of experience".to_string(),
            required: true,
            options: None,
            min_value: Some(0.0),
            max_value: Some(50.0),
            max_length: None,
            show_if_question_id: None,
            show_if_equals: None,
        },
        text_question(QuestionType::File, "Upload sample work", false, None),
        Question {
            id: relocation_id,
            question_type: QuestionType::Single,
            question: "Open to relocation?".to_string(),
            required: true,
            options: Some(vec!["Yes".to_string(), "No".to_string()]),
            min_value: None,
            max_value: None,
            max_length: None,
            show_if_question_id: None,
            show_if_equals: None,
        },
        Question {
            // Only shown when the relocation answer is "Yes".
            id: Uuid::new_v4(),
            question_type: QuestionType::ShortText,
            question: "Current city".to_string(),
            required: false,
            options: None,
            min_value: None,
            max_value: None,
            max_length: None,
            show_if_question_id: Some(relocation_id),
            show_if_equals: Some(serde_json::json!("Yes")),
        },
        choice_question(
            QuestionType::Single,
            "Interested in management?",
            false,
            &["Yes", "No"],
        ),
        text_question(
            QuestionType::LongText,
            "Leadership experience",
            false,
            Some(600),
        ),
    ]
}

fn choice_question(
    question_type: QuestionType,
    question: &str,
    required: bool,
    options: &[&str],
) -> Question {
    Question {
        id: Uuid::new_v4(),
        question_type,
        question: question.to_string(),
        required,
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        min_value: None,
        max_value: None,
        max_length: None,
        show_if_question_id: None,
        show_if_equals: None,
    }
}

fn text_question(
    question_type: QuestionType,
    question: &str,
    required: bool,
    max_length: Option<u32>,
) -> Question {
    Question {
        id: Uuid::new_v4(),
        question_type,
        question: question.to_string(),
        required,
        options: None,
        min_value: None,
        max_value: None,
        max_length,
        show_if_question_id: None,
        show_if_equals: None,
    }
}
