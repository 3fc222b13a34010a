//! Call orchestration.
//!
//! One [`CallOrchestrator`] serves one function. Each [`invoke`] runs the
//! attempt through `Idle -> Validating -> Encoding -> Submitted`, or back to
//! `Idle` with per-parameter errors when any input fails validation. Nothing
//! is encoded or submitted unless every parameter is valid.
//!
//! Attempts are stamped with a generation number. When a newer attempt starts
//! while an older one is still resolving objects, the older attempt's results
//! are discarded instead of overwriting the newer error state.
//!
//! [`invoke`]: CallOrchestrator::invoke

use anyhow::{bail, Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

use sui_call_types::{FunctionSignature, NormalizedType, RawInput, TypeCategory};

use crate::builder::{CallArgBuilder, PreparedCall};
use crate::config::EngineConfig;
use crate::encoder::{prepare_arguments, to_type_tag};
use crate::resolver::{NetworkContext, ObjectTypeResolver};
use crate::submit::{CallSubmitter, SubmissionReceipt};
use crate::validator::{Validator, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationState {
    Idle,
    Validating,
    Encoding,
    Submitted,
}

/// Inline error for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamError {
    pub index: usize,
    pub type_name: String,
    pub message: String,
    /// The value could not be checked because an object lookup failed.
    pub unresolved: bool,
}

impl ParamError {
    fn new(index: usize, ty: &NormalizedType, verdict: Verdict) -> Self {
        let type_name = ty.type_name();
        Self {
            index,
            message: format!("Invalid value for type {}", type_name),
            type_name,
            unresolved: verdict == Verdict::Unknown,
        }
    }
}

/// What the input layer needs to render one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamView {
    pub index: usize,
    pub type_name: String,
    pub category: TypeCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Submitted {
        generation: u64,
        receipt: SubmissionReceipt,
        call: PreparedCall,
    },
    Rejected {
        generation: u64,
        errors: Vec<ParamError>,
    },
    /// A newer attempt started before this one finished validating.
    Superseded { generation: u64 },
}

impl InvocationOutcome {
    pub fn generation(&self) -> u64 {
        match self {
            InvocationOutcome::Submitted { generation, .. }
            | InvocationOutcome::Rejected { generation, .. }
            | InvocationOutcome::Superseded { generation } => *generation,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, InvocationOutcome::Submitted { .. })
    }
}

struct AttemptState {
    phase: InvocationState,
    generation: u64,
    errors: Vec<ParamError>,
}

pub struct CallOrchestrator<R, S> {
    signature: FunctionSignature,
    resolver: R,
    submitter: S,
    ctx: NetworkContext,
    check_ranges: bool,
    concurrent_validation: bool,
    generation: AtomicU64,
    state: Mutex<AttemptState>,
}

impl<R: ObjectTypeResolver, S: CallSubmitter> CallOrchestrator<R, S> {
    pub fn new(signature: FunctionSignature, resolver: R, submitter: S, ctx: NetworkContext) -> Self {
        Self {
            signature,
            resolver,
            submitter,
            ctx,
            check_ranges: true,
            concurrent_validation: true,
            generation: AtomicU64::new(0),
            state: Mutex::new(AttemptState {
                phase: InvocationState::Idle,
                generation: 0,
                errors: Vec::new(),
            }),
        }
    }

    pub fn from_config(
        signature: FunctionSignature,
        resolver: R,
        submitter: S,
        config: &EngineConfig,
    ) -> Self {
        Self::new(signature, resolver, submitter, config.network_context())
            .with_range_checks(config.check_ranges)
            .with_concurrent_validation(config.concurrent_validation)
    }

    pub fn with_range_checks(mut self, check_ranges: bool) -> Self {
        self.check_ranges = check_ranges;
        self
    }

    pub fn with_concurrent_validation(mut self, concurrent: bool) -> Self {
        self.concurrent_validation = concurrent;
        self
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Parameters the user fills in. A trailing `TxContext` is never among them.
    pub fn parameters(&self) -> &[NormalizedType] {
        self.signature.user_parameters()
    }

    pub fn parameter_views(&self) -> Vec<ParamView> {
        self.parameters()
            .iter()
            .enumerate()
            .map(|(index, ty)| ParamView {
                index,
                type_name: ty.type_name(),
                category: ty.category(),
            })
            .collect()
    }

    pub fn phase(&self) -> InvocationState {
        self.state.lock().phase
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Errors of the latest attempt that finished validating.
    pub fn errors(&self) -> Vec<ParamError> {
        self.state.lock().errors.clone()
    }

    /// One flag per parameter, `true` where the latest attempt failed.
    pub fn error_flags(&self) -> Vec<bool> {
        let mut flags = vec![false; self.parameters().len()];
        for err in &self.state.lock().errors {
            if let Some(flag) = flags.get_mut(err.index) {
                *flag = true;
            }
        }
        flags
    }

    /// Validate `raws` against the parameters and, if all pass, encode and
    /// submit the call.
    ///
    /// `type_arguments` must supply exactly one concrete type per type
    /// parameter of the function. Rejection is an `Ok` outcome; `Err` is
    /// reserved for bad type arguments and encoder or submitter failures.
    pub async fn invoke(
        &self,
        raws: &[RawInput],
        type_arguments: &[NormalizedType],
    ) -> Result<InvocationOutcome> {
        if type_arguments.len() != self.signature.type_parameter_count {
            bail!(
                "{} expects {} type argument(s), got {}",
                self.signature.target,
                self.signature.type_parameter_count,
                type_arguments.len()
            );
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().phase = InvocationState::Validating;

        let params: Vec<NormalizedType> = self
            .parameters()
            .iter()
            .map(|ty| ty.substitute(type_arguments))
            .collect();

        let start = Instant::now();
        let validator =
            Validator::new(&self.resolver, &self.ctx).with_range_checks(self.check_ranges);
        let verdicts = validator
            .validate_all(&params, raws, self.concurrent_validation)
            .await;

        let errors: Vec<ParamError> = verdicts
            .iter()
            .zip(&params)
            .enumerate()
            .filter(|(_, (verdict, _))| !verdict.is_valid())
            .map(|(index, (verdict, ty))| ParamError::new(index, ty, *verdict))
            .collect();

        {
            let mut state = self.state.lock();
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(
                    generation = generation,
                    current = self.generation.load(Ordering::SeqCst),
                    "discarding stale validation round"
                );
                return Ok(InvocationOutcome::Superseded { generation });
            }

            state.generation = generation;
            state.errors = errors.clone();
            debug!(
                generation = generation,
                params = params.len(),
                failed = errors.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "validation finished"
            );

            if !errors.is_empty() {
                state.phase = InvocationState::Idle;
                return Ok(InvocationOutcome::Rejected { generation, errors });
            }
            state.phase = InvocationState::Encoding;
        }

        let call = match self.prepare(raws, &params, type_arguments) {
            Ok(call) => call,
            Err(e) => {
                self.finish_attempt(generation, InvocationState::Idle);
                return Err(e);
            }
        };

        let receipt = match self.submitter.submit(&call).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(generation = generation, error = %e, "submission failed");
                self.finish_attempt(generation, InvocationState::Idle);
                return Err(e.context(format!("Failed to submit {}", self.signature.target)));
            }
        };

        info!(
            generation = generation,
            target_fn = %self.signature.target,
            reference = %receipt.reference,
            "call submitted"
        );
        self.finish_attempt(generation, InvocationState::Submitted);

        Ok(InvocationOutcome::Submitted {
            generation,
            receipt,
            call,
        })
    }

    fn prepare(
        &self,
        raws: &[RawInput],
        params: &[NormalizedType],
        type_arguments: &[NormalizedType],
    ) -> Result<PreparedCall> {
        let type_tags = type_arguments
            .iter()
            .map(|ty| to_type_tag(ty).map(|tag| tag.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid type argument")?;

        let mut builder = CallArgBuilder::new();
        let (arguments, encoded) = prepare_arguments(&mut builder, raws, params)?;

        Ok(builder.finish(
            self.signature.target.clone(),
            type_tags,
            arguments,
            encoded,
        ))
    }

    fn finish_attempt(&self, generation: u64, phase: InvocationState) {
        let mut state = self.state.lock();
        if state.generation == generation && self.current_generation() == generation {
            state.phase = phase;
        }
    }
}
