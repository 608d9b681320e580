use clap::Parser;
use stackexplain::app::input::{self, InputSource};
use stackexplain::core::explainer::failure_record;
use stackexplain::utils::error::{ErrorCategory, ErrorSeverity, ExplainError};
use stackexplain::utils::{logger, validation::Validate};
use stackexplain::{build_explainer, format_report, AppConfig, CliArgs};
use std::io::IsTerminal;

fn exit_code(e: &ExplainError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: ExplainError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    if matches!(e, ExplainError::ClipboardError { .. }) {
        eprintln!("⚠️ {}", input::clipboard_hint());
    } else if e.category() != ErrorCategory::Input {
        eprintln!("💡 {}", e.recovery_suggestion());
    }
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    args.apply_to(&mut config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let stdin = std::io::stdin();
    let is_terminal = stdin.is_terminal();
    if args.error.is_none() && is_terminal {
        println!("{}", input::paste_hint());
    }

    let (error, source) =
        match input::resolve_error_input(args.error.clone(), is_terminal, stdin.lock(), input::read_clipboard) {
            Ok(resolved) => resolved,
            Err(e) => fail(e),
        };
    if source == InputSource::Clipboard {
        println!("[Using clipboard contents as error input]\n");
    }

    if let Err(e) = stackexplain::utils::validation::validate_error_message(&error) {
        fail(e);
    }

    let explainer = match build_explainer(&config) {
        Ok(explainer) => explainer,
        Err(e) => fail(e),
    };

    if !args.json {
        println!("Reasoning...");
    }

    let model = explainer.settings().model.clone();
    let (result, failed) = match explainer.explain_with_retries(error.trim(), &model).await {
        Ok(result) => (result, false),
        Err(e) => (failure_record(&e), true),
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e.into()),
        }
    } else {
        println!("{}", format_report(&result));
    }

    if failed {
        std::process::exit(2);
    }
}
