use crate::commands::{build_runtime, load_config, CommandResult};
use staffdesk_core::domain::employee::EmpCode;
use staffdesk_db::connect_with_settings;
use staffdesk_db::repositories::{ChangeRequestRepository, SqlChangeRequestRepository};

pub fn run(emp_code: &str) -> CommandResult {
    let config = match load_config("requests") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let runtime = match build_runtime("requests") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let code = EmpCode(emp_code.trim().to_string());
    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        let listed = SqlChangeRequestRepository::new(pool.clone()).list_for_employee(&code).await;
        pool.close().await;
        listed.map_err(|error| ("query", error.to_string(), 6u8))
    });

    match result {
        Ok(requests) if requests.is_empty() => {
            CommandResult::success("requests", format!("no change requests recorded for {code}"))
        }
        Ok(requests) => {
            let lines = requests
                .iter()
                .map(|request| {
                    format!(
                        "  - {} [{}] {}: {} ➝ {} ({})",
                        request.id.0,
                        request.status.as_str(),
                        request.field,
                        request.old_value.as_deref().unwrap_or("<none>"),
                        request.new_value,
                        request.created_at.to_rfc3339()
                    )
                })
                .collect::<Vec<_>>();
            CommandResult::success(
                "requests",
                format!("{} change request(s) for {code}:\n{}", requests.len(), lines.join("\n")),
            )
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("requests", error_class, message, exit_code)
        }
    }
}
