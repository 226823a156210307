use crate::commands::{build_runtime, load_config, CommandResult};
use staffdesk_db::{connect_with_settings, migrations, DemoDirectory};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let runtime = match build_runtime("seed") {
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

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let seed_result = DemoDirectory::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let missing = DemoDirectory::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        pool.close().await;

        if !missing.is_empty() {
            let codes = missing.iter().map(|code| code.0.as_str()).collect::<Vec<_>>();
            return Err((
                "seed_verification",
                format!("seeded employees missing after load: {}", codes.join(", ")),
                6u8,
            ));
        }

        Ok::<_, (&'static str, String, u8)>(seed_result)
    });

    match result {
        Ok(seed_result) => {
            let employees = DemoDirectory::employees();
            let lines = seed_result
                .employees_seeded
                .iter()
                .map(|code| {
                    let detail = employees
                        .iter()
                        .find(|employee| &employee.emp_code == code)
                        .map(|employee| format!("{} ({})", employee.name, employee.department))
                        .unwrap_or_default();
                    format!("  - {code}: {detail}")
                })
                .collect::<Vec<_>>();
            CommandResult::success(
                "seed",
                format!(
                    "seeded {} demo employees:\n{}",
                    seed_result.employees_seeded.len(),
                    lines.join("\n")
                ),
            )
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}
