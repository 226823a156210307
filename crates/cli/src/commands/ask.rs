use std::sync::Arc;

use crate::commands::{build_runtime, load_config, CommandResult};
use staffdesk_agent::{ChangeOutcome, ChangePipeline, LlmClient, OllamaClient};
use staffdesk_core::config::AppConfig;
use staffdesk_core::domain::employee::EmpCode;
use staffdesk_db::connect_with_settings;
use staffdesk_db::repositories::{SqlChangeRequestRepository, SqlEmployeeRepository};

pub fn run(emp_code: &str, question: &str) -> CommandResult {
    let config = match load_config("ask") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let llm = match OllamaClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(error) => {
            return CommandResult::failure(
                "ask",
                "llm_client",
                format!("failed to build model client: {error}"),
                3,
            );
        }
    };

    execute(&config, Arc::new(llm), emp_code, question)
}

/// Same as `run`, but with a caller-supplied model client.
pub fn run_with_llm(emp_code: &str, question: &str, llm: Arc<dyn LlmClient>) -> CommandResult {
    match load_config("ask") {
        Ok(config) => execute(&config, llm, emp_code, question),
        Err(failure) => failure,
    }
}

fn execute(
    config: &AppConfig,
    llm: Arc<dyn LlmClient>,
    emp_code: &str,
    question: &str,
) -> CommandResult {
    let runtime = match build_runtime("ask") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let pipeline = ChangePipeline::new(
            Arc::new(SqlEmployeeRepository::new(pool.clone())),
            Arc::new(SqlChangeRequestRepository::new(pool.clone())),
            llm,
        );
        let outcome = pipeline.run(&EmpCode(emp_code.trim().to_string()), question).await;

        pool.close().await;
        Ok::<ChangeOutcome, (&'static str, String, u8)>(outcome)
    });

    match result {
        Ok(outcome) => match &outcome {
            ChangeOutcome::Failed(error) => CommandResult::answered(
                "ask",
                outcome.kind(),
                Some(error.error_class()),
                outcome.to_string(),
                outcome.detail(),
                6,
            ),
            _ => CommandResult::answered(
                "ask",
                outcome.kind(),
                None,
                outcome.to_string(),
                outcome.detail(),
                0,
            ),
        },
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("ask", error_class, message, exit_code)
        }
    }
}
