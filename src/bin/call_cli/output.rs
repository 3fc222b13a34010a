//! Output formatting for sui-call

use sui_call_studio::engine::orchestrator::ParamView;
use sui_call_studio::{ParamError, PreparedCall, Verdict};

pub fn format_error(err: &anyhow::Error, json: bool) -> String {
    if json {
        serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(|c| c.to_string()).collect::<Vec<_>>(),
        })
        .to_string()
    } else {
        format!("\x1b[31mError:\x1b[0m {:#}", err)
    }
}

pub fn format_params(target: &str, params: &[ParamView], type_params: usize, hidden_ctx: bool) -> String {
    let mut out = format!("\x1b[1m{}\x1b[0m\n", target);
    if type_params > 0 {
        out.push_str(&format!("Type parameters: {}\n", type_params));
    }
    if params.is_empty() {
        out.push_str("  (no parameters)\n");
    }
    for p in params {
        out.push_str(&format!(
            "  [{}] \x1b[36m{}\x1b[0m ({})\n",
            p.index, p.type_name, p.category
        ));
    }
    if hidden_ctx {
        out.push_str("  (TxContext supplied by the runtime)\n");
    }
    out
}

pub fn format_verdicts(type_names: &[String], verdicts: &[Verdict]) -> String {
    let mut out = String::new();
    for (idx, (name, verdict)) in type_names.iter().zip(verdicts).enumerate() {
        let mark = match verdict {
            Verdict::Valid => "\x1b[32m✓\x1b[0m",
            Verdict::Invalid => "\x1b[31m✗\x1b[0m",
            Verdict::Unknown => "\x1b[33m?\x1b[0m",
        };
        out.push_str(&format!("  {} [{}] {}\n", mark, idx, name));
    }
    out
}

pub fn format_param_errors(errors: &[ParamError]) -> String {
    let mut out = String::new();
    for err in errors {
        let note = if err.unresolved {
            " (object lookup failed)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  \x1b[31m[{}]\x1b[0m {}{}\n",
            err.index, err.message, note
        ));
    }
    out
}

pub fn format_prepared_call(call: &PreparedCall) -> String {
    let mut out = format!(
        "\x1b[32m✓ Prepared call\x1b[0m {} ({} input(s), {} command(s))\n",
        call.target,
        call.inputs.len(),
        call.commands.len()
    );
    if !call.type_arguments.is_empty() {
        out.push_str(&format!("Type arguments: {}\n", call.type_arguments.join(", ")));
    }
    for (idx, arg) in call.arguments.iter().enumerate() {
        out.push_str(&format!("  [{}] {:?}\n", idx, arg));
    }
    out
}
