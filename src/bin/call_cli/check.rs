//! Check command - validate and encode values against explicit types

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use super::object_resolver;
use super::output::{format_prepared_call, format_verdicts};
use sui_call_studio::engine::builder::CallArgBuilder;
use sui_call_studio::engine::encoder::prepare_arguments;
use sui_call_studio::input::{parse_raw_inputs, parse_types};
use sui_call_studio::{EngineConfig, FunctionTarget, Validator};

#[derive(Parser, Debug)]
pub struct CheckCmd {
    /// Parameter types in declared order (e.g. u64 "&0x2::clock::Clock")
    #[arg(long = "params", num_args(1..), required = true)]
    pub params: Vec<String>,

    /// Values as a JSON array, one entry per parameter
    #[arg(long)]
    pub args: String,

    /// JSON file mapping object IDs to type strings (skips the network)
    #[arg(long)]
    pub objects: Option<PathBuf>,
}

impl CheckCmd {
    pub async fn execute(&self, config: &EngineConfig, json: bool) -> Result<()> {
        let params = parse_types(&self.params)?;
        let raws = parse_raw_inputs(&self.args)?;
        if raws.len() != params.len() {
            bail!(
                "{} parameter type(s) but {} argument(s)",
                params.len(),
                raws.len()
            );
        }

        let resolver = object_resolver(config, self.objects.as_deref())?;
        let ctx = config.network_context();
        let validator =
            Validator::new(resolver.as_ref(), &ctx).with_range_checks(config.check_ranges);
        let verdicts = validator
            .validate_all(&params, &raws, config.concurrent_validation)
            .await;
        let all_valid = verdicts.iter().all(|v| v.is_valid());

        let prepared = if all_valid {
            let mut builder = CallArgBuilder::new();
            let (arguments, encoded) = prepare_arguments(&mut builder, &raws, &params)?;
            Some(builder.finish(
                FunctionTarget::new("0x0", "check", "check"),
                Vec::new(),
                arguments,
                encoded,
            ))
        } else {
            None
        };

        let type_names: Vec<String> = params.iter().map(|t| t.type_name()).collect();
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "valid": all_valid,
                    "parameters": type_names,
                    "verdicts": verdicts,
                    "inputs": prepared.as_ref().map(|c| &c.inputs),
                    "encoded": prepared.as_ref().map(|c| &c.encoded),
                }))?
            );
        } else {
            print!("{}", format_verdicts(&type_names, &verdicts));
            if let Some(call) = &prepared {
                print!("{}", format_prepared_call(call));
            }
        }

        if !all_valid {
            let failed = verdicts.iter().filter(|v| !v.is_valid()).count();
            bail!("{} of {} argument(s) invalid", failed, verdicts.len());
        }
        Ok(())
    }
}
