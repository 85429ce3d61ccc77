pub mod company;
pub mod job;

pub use company::Company;
pub use job::{Job, JobDetail, JobListing};
