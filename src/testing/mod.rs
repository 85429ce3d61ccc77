// In-memory JobStore for exercising the HTTP layer without PostgreSQL.
// Mirrors the table semantics the handlers rely on: title ordering, the
// three list filters, the company foreign key and NotFound on missing ids.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::database::models::{Company, Job, JobDetail, JobListing};
use crate::database::{DatabaseError, JobStore};
use crate::filter::JobFilter;
use crate::schemas::{JobUpdate, NewJob};

pub struct MemoryJobStore {
    companies: HashMap<String, Company>,
    jobs: Mutex<BTreeMap<i32, Job>>,
    next_id: Mutex<i32>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self {
            companies: HashMap::new(),
            jobs: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Companies c1..c3 and jobs Job1..Job4 (ids 1..4) under c1
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for n in 1..=3 {
            let company = Company {
                handle: format!("c{}", n),
                name: format!("C{}", n),
                description: format!("Desc{}", n),
                num_employees: Some(n),
                logo_url: Some(format!("http://c{}.img", n)),
            };
            store.companies.insert(company.handle.clone(), company);
        }

        let seed = [
            ("Job1", Some(100), Some("0.1")),
            ("Job2", Some(200), Some("0.2")),
            ("Job3", Some(300), Some("0")),
            ("Job4", None, None),
        ];
        for (title, salary, equity) in seed {
            store.insert(Job {
                id: 0,
                title: title.to_string(),
                salary,
                equity: equity.map(str::to_string),
                company_handle: "c1".to_string(),
            });
        }
        store
    }

    fn insert(&self, mut job: Job) -> Job {
        let mut next_id = self.next_id.lock().unwrap();
        job.id = *next_id;
        *next_id += 1;
        self.jobs.lock().unwrap().insert(job.id, job.clone());
        job
    }

    fn company(&self, handle: &str) -> Result<&Company, DatabaseError> {
        self.companies
            .get(handle)
            .ok_or_else(|| DatabaseError::BadRequest("Referenced company does not exist".to_string()))
    }

    fn matches(filter: &JobFilter, job: &Job) -> bool {
        if let Some(title) = filter.title.as_deref() {
            if !job.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        if let Some(min) = filter.min_salary {
            if !job.salary.is_some_and(|s| i64::from(s) >= min) {
                return false;
            }
        }
        if filter.has_equity {
            let positive = job
                .equity
                .as_deref()
                .and_then(|e| Decimal::from_str(e).ok())
                .is_some_and(|e| e > Decimal::ZERO);
            if !positive {
                return false;
            }
        }
        true
    }
}

fn no_job(id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("No job: {}", id))
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, data: NewJob) -> Result<Job, DatabaseError> {
        self.company(&data.company_handle)?;
        Ok(self.insert(Job {
            id: 0,
            title: data.title,
            salary: data.salary,
            equity: data.equity,
            company_handle: data.company_handle,
        }))
    }

    async fn find_all(&self, filter: JobFilter) -> Result<Vec<JobListing>, DatabaseError> {
        let jobs = self.jobs.lock().unwrap();
        let mut out = Vec::new();
        for job in jobs.values().filter(|j| Self::matches(&filter, j)) {
            out.push(JobListing {
                id: job.id,
                title: job.title.clone(),
                salary: job.salary,
                equity: job.equity.clone(),
                company_handle: job.company_handle.clone(),
                company_name: self.company(&job.company_handle)?.name.clone(),
            });
        }
        out.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(out)
    }

    async fn get(&self, id: i32) -> Result<JobDetail, DatabaseError> {
        let job = self.jobs.lock().unwrap().get(&id).cloned().ok_or_else(|| no_job(id))?;
        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company: self.company(&job.company_handle)?.clone(),
        })
    }

    async fn update(&self, id: i32, data: JobUpdate) -> Result<Job, DatabaseError> {
        if data.is_empty() {
            return Err(DatabaseError::BadRequest("No data".to_string()));
        }
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs.get_mut(&id).ok_or_else(|| no_job(id))?;
        if let Some(title) = data.title {
            job.title = title;
        }
        if let Some(salary) = data.salary {
            job.salary = Some(salary);
        }
        if let Some(equity) = data.equity {
            job.equity = Some(equity);
        }
        Ok(job.clone())
    }

    async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        self.jobs.lock().unwrap().remove(&id).map(|_| ()).ok_or_else(|| no_job(id))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
