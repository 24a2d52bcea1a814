//! Whole-session driver: every instance of a publish, then the increment guard.

use std::path::PathBuf;

use crate::collect::pipeline::CollectOutcome;
use crate::foundation::error::CollectError;
use crate::model::instance::Instance;
use crate::session::publish_session::{PublishSession, SessionOpts, WorkfileSettings};
use crate::workfile::version::{IncrementDecision, PublishResult, SkipReason, plan_increment};

/// Input of a publish session.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub workfile: WorkfileSettings,
    pub opts: SessionOpts,
    pub instances: Vec<Instance>,
    /// Results of publish steps that ran outside this session.
    pub results: Vec<PublishResult>,
}

/// An instance whose collection failed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InstanceFailure {
    pub instance: String,
    /// Validation key, when the failure is user-actionable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
}

/// What the increment guard decided.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum IncrementStatus {
    Increment { path: PathBuf },
    Skipped { reason: SkipReason },
    Refused { message: String },
}

/// Outcome of [`run_session`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SessionReport {
    pub instances: Vec<Instance>,
    /// Names of instances without a write node.
    pub skipped: Vec<String>,
    pub failures: Vec<InstanceFailure>,
    pub next_workfile: Option<PathBuf>,
    pub increment: IncrementStatus,
}

impl SessionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl InstanceFailure {
    fn new(instance: &str, err: &CollectError) -> Self {
        Self {
            instance: instance.to_string(),
            key: err.key().map(str::to_string),
            message: err.to_string(),
        }
    }
}

/// Collect every instance of `file`, then decide the next workfile version.
///
/// A failing instance is recorded and does not stop the others; its failure
/// also counts as a failed publish result for the increment guard.
#[tracing::instrument(skip_all, fields(instances = file.instances.len()))]
pub fn run_session(file: SessionFile) -> SessionReport {
    let mut session = PublishSession::new(file.workfile, file.opts);
    run_with_session(&mut session, file.instances, file.results)
}

/// Same as [`run_session`] over an already configured session.
pub fn run_with_session(
    session: &mut PublishSession,
    mut instances: Vec<Instance>,
    mut results: Vec<PublishResult>,
) -> SessionReport {
    let mut skipped = Vec::new();
    let mut failures = Vec::new();

    for instance in instances.iter_mut() {
        match session.collect_instance(instance) {
            Ok(CollectOutcome::Collected) => results.push(PublishResult {
                label: instance.name.clone(),
                success: true,
                error: None,
            }),
            Ok(CollectOutcome::Skipped) => skipped.push(instance.name.clone()),
            Err(err) => {
                tracing::error!(instance = %instance.name, %err, "collection failed");
                let failure = InstanceFailure::new(&instance.name, &err);
                results.push(PublishResult {
                    label: instance.name.clone(),
                    success: false,
                    error: Some(failure.message.clone()),
                });
                failures.push(failure);
            }
        }
    }

    let increment = match plan_increment(
        &session.opts().increment,
        &instances,
        &results,
        session.workfile().current_file.as_deref(),
    ) {
        Ok(IncrementDecision::Increment(path)) => IncrementStatus::Increment { path },
        Ok(IncrementDecision::Skipped(reason)) => IncrementStatus::Skipped { reason },
        Err(err) => {
            tracing::warn!(%err, "workfile version not increased");
            IncrementStatus::Refused {
                message: err.to_string(),
            }
        }
    };
    let next_workfile = match &increment {
        IncrementStatus::Increment { path } => Some(path.clone()),
        _ => None,
    };

    SessionReport {
        instances,
        skipped,
        failures,
        next_workfile,
        increment,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collect/batch.rs"]
mod tests;
