use clap::FromArgMatches;
use manifold_cli::api::factory::HttpClientFactory;
use manifold_cli::cli::dispatcher::Dispatcher;
use manifold_cli::cli::main_types::Cli;
use manifold_cli::cli::registry::build_command;
use manifold_cli::core::prompts::TerminalPrompter;
use manifold_cli::core::services::Collaborators;
use manifold_cli::core::services::config_service::ConfigService;
use manifold_cli::core::session::ApiSessionProvider;
use manifold_cli::utils::logging::{init_logger, log_error, print_verbose};

#[tokio::main]
async fn main() {
    let matches = build_command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    init_logger(cli.verbose);
    print_verbose(cli.verbose, "Verbose mode is enabled");
    if let Some(config_dir) = &cli.config_dir {
        print_verbose(cli.verbose, &format!("Using config directory: {}", config_dir));
    }

    let config = ConfigService::new(cli.config_dir.clone());
    let sessions = ApiSessionProvider::new();
    let prompter = TerminalPrompter::new();
    let clients = HttpClientFactory::new();
    let deps = Collaborators {
        config: &config,
        sessions: &sessions,
        prompter: &prompter,
        clients: &clients,
    };

    let dispatcher = Dispatcher::new(deps, cli.verbose);
    match dispatcher.dispatch(cli.command).await {
        Ok(outcome) if outcome.is_informational() => eprintln!("{}", outcome.message()),
        Ok(outcome) => println!("{}", outcome.message()),
        Err(e) => {
            if let Some(name) = e.usage_command() {
                let mut cmd = build_command();
                cmd.build();
                if let Some(sub) = cmd.find_subcommand_mut(name) {
                    eprintln!("{}", sub.render_help());
                }
            }
            log_error(&format!("{} {}", e.severity().emoji(), e));
            if let Some(hint) = e.troubleshooting_hint() {
                eprintln!("Hint: {}", hint);
            }
            std::process::exit(e.exit_code());
        }
    }
}
