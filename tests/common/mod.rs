//! Shared test doubles.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use struk::error::BackendError;
use struk::transport::PrinterBackend;

/// How the fake spooler answers a submission.
#[derive(Debug, Clone)]
pub enum Outcome {
    Accept,
    Reject(String),
    Hang,
}

/// A job as the fake spooler saw it.
#[derive(Debug, Clone)]
pub struct Job {
    pub path: PathBuf,
    pub printer: String,
    pub bytes: Vec<u8>,
}

/// In-memory spooler with a fixed printer list.
#[derive(Debug)]
pub struct FakeBackend {
    printers: Vec<String>,
    outcome: Outcome,
    jobs: Mutex<Vec<Job>>,
}

impl FakeBackend {
    pub fn new(printers: &[&str], outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            printers: printers.iter().map(|p| p.to_string()).collect(),
            outcome,
            jobs: Mutex::new(Vec::new()),
        })
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl PrinterBackend for FakeBackend {
    fn platform(&self) -> &'static str {
        "fake"
    }

    async fn native_printers(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.printers.clone())
    }

    async fn query_printers(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.printers.clone())
    }

    async fn submit_raw(&self, file: &Path, printer: &str) -> Result<(), BackendError> {
        let bytes = tokio::fs::read(file).await.expect("staged file readable");
        self.jobs.lock().unwrap().push(Job {
            path: file.to_path_buf(),
            printer: printer.to_string(),
            bytes,
        });

        match &self.outcome {
            Outcome::Accept => Ok(()),
            Outcome::Reject(message) => Err(BackendError::Failed {
                program: "lpr".to_string(),
                message: message.clone(),
            }),
            Outcome::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }
}

/// A fresh, empty directory under the OS temp dir.
pub fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("struk-{}-{}", label, uuid::Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Number of entries in `dir`.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
