//! Call command - validate values for a deployed function and print the
//! prepared call (dry run, nothing is signed)

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::path::PathBuf;

use super::object_resolver;
use super::output::{format_param_errors, format_prepared_call};
use sui_call_studio::engine::SignatureSource;
use sui_call_studio::input::{parse_raw_inputs, parse_type_arguments};
use sui_call_studio::{
    CallOrchestrator, EngineConfig, FunctionTarget, GraphQLSignatureSource, InvocationOutcome,
    RecordingSubmitter,
};

#[derive(Parser, Debug)]
pub struct CallCmd {
    /// Target function: "0xPKG::module::function"
    pub target: String,

    /// Values as a JSON array, one entry per user-facing parameter
    #[arg(long, default_value = "[]")]
    pub args: String,

    /// Type arguments (e.g., "0x2::sui::SUI")
    #[arg(long = "type-arg", num_args(1..))]
    pub type_args: Vec<String>,

    /// JSON file mapping object IDs to type strings (skips object lookups)
    #[arg(long)]
    pub objects: Option<PathBuf>,
}

impl CallCmd {
    pub async fn execute(&self, config: &EngineConfig, json: bool) -> Result<()> {
        let target = FunctionTarget::parse(&self.target)
            .ok_or_else(|| anyhow!("Invalid target '{}': expected PKG::module::function", self.target))?;
        let raws = parse_raw_inputs(&self.args)?;
        let type_args = parse_type_arguments(&self.type_args)?;

        let source =
            GraphQLSignatureSource::new(config.request_timeout(), config.connect_timeout());
        let signature = source
            .fetch_function(&target, &config.network_context())
            .await?;

        let resolver = object_resolver(config, self.objects.as_deref())?;
        let orchestrator =
            CallOrchestrator::from_config(signature, resolver, RecordingSubmitter::new(), config);

        match orchestrator.invoke(&raws, &type_args).await? {
            InvocationOutcome::Submitted { call, .. } => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&call)?);
                } else {
                    print!("{}", format_prepared_call(&call));
                }
                Ok(())
            }
            InvocationOutcome::Rejected { errors, .. } => {
                if json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "success": false,
                            "errors": errors,
                        }))?
                    );
                } else {
                    print!("{}", format_param_errors(&errors));
                }
                bail!("{} argument(s) invalid", errors.len())
            }
            InvocationOutcome::Superseded { .. } => bail!("invocation superseded"),
        }
    }
}
