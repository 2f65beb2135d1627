use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use svmflow_cli::report;
use svmflow_cli::util::select_data_files;
use svmflow_cli::workflow::{
    resolve_mode, run_classify, run_train, ClassifyOptions, Mode, TrainOptions, MODEL_OUT,
    TRAIN_SET_OUT,
};
use svmflow_core::codec::DatCodec;
use svmflow_core::config::{KernelKind, SvmParameters};
use svmflow_core::engine::SmoEngine;
use svmflow_core::error::WorkflowError;

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default()
                .filter_or("SVMFLOW_LOG", "error,svmflow_cli=info,svmflow_core=info"),
        )
        .init();

    let mut command = build_command();
    let matches = command.clone().get_matches();

    match run(&matches, &mut command) {
        Ok(()) => {}
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(err.exit_code());
        }
    }
}

fn build_command() -> Command {
    Command::new("svmflow")
        .version(clap::crate_version!())
        .about("Train and evaluate a support-vector classifier over .dat feature files")
        .arg(
            Arg::new("classify")
                .short('c')
                .long("classify")
                .action(ArgAction::SetTrue)
                .help("Classify new data using the model in the first .dat file and the data in the second"),
        )
        .arg(
            Arg::new("train")
                .short('t')
                .long("train")
                .action(ArgAction::SetTrue)
                .help("Train the classifier using the first .dat file"),
        )
        .arg(
            Arg::new("train_classify")
                .long("tc")
                .action(ArgAction::SetTrue)
                .help("After training, classify the data in the second .dat file (requires --train)"),
        )
        .arg(
            Arg::new("save")
                .short('s')
                .long("save")
                .action(ArgAction::SetTrue)
                .help(format!(
                    "Persist the training set to {} and the model to {} (requires --train)",
                    TRAIN_SET_OUT, MODEL_OUT
                )),
        )
        .arg(
            Arg::new("probability")
                .long("probability")
                .action(ArgAction::SetTrue)
                .conflicts_with("no_probability")
                .help("Force probability estimates on (training and classification)"),
        )
        .arg(
            Arg::new("no_probability")
                .long("no-probability")
                .action(ArgAction::SetTrue)
                .help("Force probability estimates off during classification"),
        )
        .arg(
            Arg::new("kernel")
                .long("kernel")
                .value_parser(["linear", "rbf", "poly"])
                .help("Kernel used for training (default: rbf)"),
        )
        .arg(
            Arg::new("gamma")
                .long("gamma")
                .value_parser(clap::value_parser!(f64))
                .help("Kernel coefficient gamma used for training"),
        )
        .arg(
            Arg::new("cost")
                .long("cost")
                .value_parser(clap::value_parser!(f64))
                .help("Regularization constant C used for training"),
        )
        .arg(
            Arg::new("no_shrinking")
                .long("no-shrinking")
                .action(ArgAction::SetTrue)
                .help("Disable the shrinking heuristic during training"),
        )
        .arg(
            Arg::new("files")
                .num_args(0..)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .help("File paths; the ones with a .dat extension are used, in order"),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
}

fn run(matches: &ArgMatches, command: &mut Command) -> Result<(), WorkflowError> {
    let train = matches.get_flag("train");
    let classify = matches.get_flag("classify");
    let train_classify = matches.get_flag("train_classify");
    let save = matches.get_flag("save");

    let Some(mode) = resolve_mode(train, classify, train_classify, save)? else {
        // No mode flag given: show usage and exit cleanly, like --help.
        let _ = command.print_help();
        return Ok(());
    };

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let data_files = select_data_files(&files);

    let probability = probability_override(matches);
    let engine = SmoEngine;
    let codec = DatCodec;

    match mode {
        Mode::Classify => {
            let model_path = data_files
                .first()
                .cloned()
                .ok_or(WorkflowError::MissingModelFile)?;
            let opts = ClassifyOptions {
                model_path,
                data_path: data_files.get(1).cloned(),
                probability,
            };
            let outcome = run_classify(&engine, &codec, &opts)?;
            report::print_classification(&outcome);
        }
        Mode::Train { classify_after } => {
            let train_path = data_files
                .first()
                .cloned()
                .ok_or(WorkflowError::MissingTrainingFile)?;
            let params = params_from_matches(matches)?;
            log::info!(
                "Training with parameters:\n{}",
                serde_json::to_string_pretty(&params).unwrap_or_default()
            );
            let opts = TrainOptions {
                train_path,
                data_path: data_files.get(1).cloned(),
                classify_after,
                save,
                probability,
                params,
            };
            let outcome = run_train(&engine, &codec, &opts)?;
            report::print_training(&outcome);
        }
    }
    Ok(())
}

/// Resolve the two probability flags into an optional override. `None`
/// keeps the model's trained setting at classify time.
fn probability_override(matches: &ArgMatches) -> Option<bool> {
    if matches.get_flag("probability") {
        Some(true)
    } else if matches.get_flag("no_probability") {
        Some(false)
    } else {
        None
    }
}

/// Layer command-line overrides on top of the declared default table.
fn params_from_matches(matches: &ArgMatches) -> Result<SvmParameters, WorkflowError> {
    let mut params = SvmParameters::default();
    if let Some(kernel) = matches.get_one::<String>("kernel") {
        params.kernel = kernel
            .parse::<KernelKind>()
            .map_err(WorkflowError::Usage)?;
    }
    if let Some(&gamma) = matches.get_one::<f64>("gamma") {
        params.gamma = gamma;
    }
    if let Some(&cost) = matches.get_one::<f64>("cost") {
        params.cost = cost;
    }
    if matches.get_flag("no_shrinking") {
        params.shrinking = false;
    }
    if matches.get_flag("probability") {
        params.probability = true;
    }
    params.validate().map_err(WorkflowError::Usage)?;
    Ok(params)
}
