pub mod application;

pub use application::{
    normalize_technologies, Application, ApplicationRow, ApplicationStatus, HeardAboutUs,
    NewApplication,
};
