//! Signature command - show the user-facing parameters of a function

use anyhow::{anyhow, Result};
use clap::Parser;

use super::output::format_params;
use sui_call_studio::engine::orchestrator::ParamView;
use sui_call_studio::engine::SignatureSource;
use sui_call_studio::{EngineConfig, FunctionTarget, GraphQLSignatureSource};

#[derive(Parser, Debug)]
pub struct SignatureCmd {
    /// Target function: "0xPKG::module::function"
    pub target: String,
}

impl SignatureCmd {
    pub async fn execute(&self, config: &EngineConfig, json: bool) -> Result<()> {
        let target = FunctionTarget::parse(&self.target)
            .ok_or_else(|| anyhow!("Invalid target '{}': expected PKG::module::function", self.target))?;
        let source =
            GraphQLSignatureSource::new(config.request_timeout(), config.connect_timeout());
        let signature = source
            .fetch_function(&target, &config.network_context())
            .await?;

        let params: Vec<ParamView> = signature
            .user_parameters()
            .iter()
            .enumerate()
            .map(|(index, ty)| ParamView {
                index,
                type_name: ty.type_name(),
                category: ty.category(),
            })
            .collect();

        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "target": signature.target.to_string(),
                    "type_parameters": signature.type_parameter_count,
                    "takes_tx_context": signature.takes_tx_context(),
                    "parameters": params,
                }))?
            );
        } else {
            print!(
                "{}",
                format_params(
                    &signature.target.to_string(),
                    &params,
                    signature.type_parameter_count,
                    signature.takes_tx_context(),
                )
            );
        }
        Ok(())
    }
}
