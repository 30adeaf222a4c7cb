#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use symptom_screen::{RemoteAnalysis, RemotePredictor, Result};

/// Inputs spanning every bundled disease plus a few that match nothing.
pub const SAMPLE_INPUTS: &[&str] = &[
    "I have a persistent cough with phlegm and mild fever",
    "high fever, chills, body aches and a dry cough for two days",
    "wheezing and chest tightness when I exercise",
    "runny nose, sneezing and itchy eyes every spring",
    "lost my sense of smell, loss of taste, fever and fatigue",
    "chest pain, rapid breathing and some confusion",
    "chronic cough, shortness of breath, frequent respiratory infections",
    "stuffy nose and a sore throat",
    "xyz unrelated nonsense",
    "",
    "   ",
];

/// A predictor that replays one canned answer and counts calls.
pub struct ScriptedPredictor {
    answer: Mutex<Option<Result<RemoteAnalysis>>>,
    pub calls: AtomicUsize,
}

impl ScriptedPredictor {
    pub fn new(answer: Result<RemoteAnalysis>) -> Self {
        Self {
            answer: Mutex::new(Some(answer)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemotePredictor for ScriptedPredictor {
    async fn predict(&self, _symptoms: &str) -> Result<RemoteAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .lock()
            .expect("predictor lock poisoned")
            .take()
            .expect("ScriptedPredictor called more than once")
    }
}
