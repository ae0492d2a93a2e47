//! CLI front-end for the tableau engine: parses a formula, builds a
//! tableau under a chosen logic and sign, and reports satisfiability,
//! models, and (on request) the construction trace. The engine itself
//! never sees argv — this binary only ever calls `tableau_engine::{parse,
//! solve}` and the `LogicRegistry`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use tableau_engine::logic::LogicRegistry;
use tableau_engine::sign::{Sign, SignedFormula};
use tableau_engine::tableau::{solve, Model, SolveOptions};
use tableau_engine::{LogicPlugin, TableauError};

#[derive(Parser)]
#[command(name = "tableaux")]
#[command(
    about = "Semantic-tableau satisfiability checker for classical, weak Kleene, wKrQ, and FDE logics"
)]
#[command(after_help = "\
EXAMPLES:
    tableaux \"p | ~p\"
    tableaux --logic=wk3 --sign=U \"p | ~p\"
    tableaux --logic=fde --sign=B --models \"p & ~p\"
    tableaux --list-logics
    tableaux --file=formulas.txt --stats
    tableaux --batch < formulas.txt")]
struct Cli {
    /// Formula to test. Omit to enter interactive mode (unless --file/--batch is given).
    formula: Option<String>,

    /// Logic system to reason under.
    #[arg(long, default_value = "classical")]
    logic: String,

    /// Sign to assign the formula before constructing the tableau.
    #[arg(long, default_value = "T")]
    sign: String,

    /// Include every extracted model in the output.
    #[arg(long)]
    models: bool,

    /// Include construction statistics in the output.
    #[arg(long)]
    stats: bool,

    /// Output format.
    #[arg(long, default_value = "default")]
    format: OutputFormat,

    /// Read one formula per line from a file (`#` starts a comment).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Read one formula per line from stdin.
    #[arg(long)]
    batch: bool,

    /// Cap how many models are returned.
    #[arg(long = "max-models")]
    max_models: Option<usize>,

    /// Parse and report syntax validity only; do not build a tableau.
    #[arg(long)]
    validate_only: bool,

    /// List every registered logic and its sign set, then exit.
    #[arg(long)]
    list_logics: bool,

    /// Include the construction trace (rule-by-rule) in the output.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    Default,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_logics {
        list_logics();
        return Ok(ExitCode::SUCCESS);
    }

    let logic = LogicRegistry::global()
        .get(&cli.logic)
        .with_context(|| format!("resolving logic '{}'", cli.logic))?;

    if let Some(path) = &cli.file {
        process_file(path, &logic, &cli)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.batch {
        process_batch(&logic, &cli)?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(text) = &cli.formula {
        let outcome = process_one(text, &logic, &cli);
        print_outcome(&outcome, cli.format);
        return Ok(if outcome.is_err() { ExitCode::from(1) } else { ExitCode::SUCCESS });
    }

    interactive(&cli)
}

fn list_logics() {
    println!("Available logics:");
    for name in LogicRegistry::global().names() {
        let plugin = LogicRegistry::global().get(&name).expect("just listed");
        let signs: Vec<String> = plugin.sign_system.signs().iter().map(|s| s.to_string()).collect();
        println!("  {:10} signs: {}", plugin.name, signs.join(", "));
    }
}

/// One formula's worth of work: parse, optionally stop at syntax check,
/// otherwise solve and shape the result into a JSON value the three
/// output formats all render from.
fn process_one(text: &str, logic: &LogicPlugin, cli: &Cli) -> Result<Value, TableauError> {
    let formula = tableau_engine::parse(text, logic)?;

    if cli.validate_only {
        return Ok(json!({
            "formula": formula.display(&logic.connectives),
            "logic": logic.name,
            "valid_syntax": true,
        }));
    }

    let sign = parse_sign(&cli.sign, logic)?;

    let options = SolveOptions {
        trace: cli.debug,
        max_models: cli.max_models,
        ..SolveOptions::default()
    };

    let start = Instant::now();
    let result = solve(vec![SignedFormula::new(sign, formula.clone())], logic, &options)?;
    let elapsed = start.elapsed();

    let mut out = json!({
        "formula": formula.display(&logic.connectives),
        "logic": logic.name,
        "sign": cli.sign,
        "satisfiable": result.satisfiable,
    });

    if cli.models {
        let models: Vec<Value> = result.models.iter().map(model_to_json).collect();
        out["models"] = json!(models);
    }

    if cli.stats {
        out["statistics"] = json!({
            "construction_time_seconds": elapsed.as_secs_f64(),
            "model_count": result.models.len(),
            "branch_count": result.tableau.branches.len(),
            "logic_system": logic.name,
            "sign_used": cli.sign,
        });
    }

    if cli.debug {
        out["trace"] = json!(result.steps);
    }

    Ok(out)
}

fn model_to_json(model: &Model) -> Value {
    let mut assignments: Vec<(&String, &tableau_engine::truth::TruthValue)> =
        model.assignments.iter().collect();
    assignments.sort_by(|a, b| a.0.cmp(b.0));
    let mut map = serde_json::Map::new();
    for (atom, value) in assignments {
        map.insert(atom.clone(), json!(value.to_string()));
    }
    if !model.domain.is_empty() {
        map.insert("domain".to_string(), json!(model.domain.iter().map(|c| c.to_string()).collect::<Vec<_>>()));
    }
    Value::Object(map)
}

fn parse_sign(text: &str, logic: &LogicPlugin) -> Result<Sign, TableauError> {
    let sign = match text.to_uppercase().as_str() {
        "T" => Sign::T,
        "F" => Sign::F,
        "U" => Sign::U,
        "M" => Sign::M,
        "N" => Sign::N,
        "B" => Sign::B,
        other => {
            return Err(TableauError::UnsupportedSign {
                sign: other.to_string(),
                logic: logic.name.to_string(),
            })
        }
    };
    if !logic.sign_system.contains(sign) {
        return Err(TableauError::UnsupportedSign { sign: sign.to_string(), logic: logic.name.to_string() });
    }
    Ok(sign)
}

fn print_outcome(outcome: &Result<Value, TableauError>, format: OutputFormat) {
    match outcome {
        Ok(value) => print!("{}", render(value, format)),
        Err(e) => print!("{}", render_error(e, format)),
    }
    println!();
}

fn render(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value).expect("Value always serializes"),
        OutputFormat::Csv => render_csv(value),
        OutputFormat::Default => render_default(value),
    }
}

fn render_error(e: &TableauError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let wrapped = json!({ "error": { "kind": error_kind(e), "detail": e.to_string() } });
            serde_json::to_string_pretty(&wrapped).expect("Value always serializes")
        }
        _ => format!("Error: {e}"),
    }
}

fn error_kind(e: &TableauError) -> &'static str {
    match e {
        TableauError::Lex { .. } => "LexError",
        TableauError::Parse { .. } => "ParseError",
        TableauError::MalformedFormula { .. } => "MalformedFormula",
        TableauError::UnknownLogic(_) => "UnknownLogic",
        TableauError::UnsupportedSign { .. } => "UnsupportedSign",
        TableauError::RuleInapplicable(_) => "RuleInapplicable",
        TableauError::IncompleteSaturation { .. } => "IncompleteSaturation",
    }
}

fn render_default(value: &Value) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Formula: {}", value["formula"].as_str().unwrap_or("?")));
    lines.push(format!("Logic: {}", value["logic"].as_str().unwrap_or("?")));

    if let Some(valid_syntax) = value.get("valid_syntax") {
        lines.push(format!("Valid syntax: {}", valid_syntax));
        return lines.join("\n");
    }

    let satisfiable = value["satisfiable"].as_bool().unwrap_or(false);
    lines.push(format!("Result: {}", if satisfiable { "SATISFIABLE" } else { "UNSATISFIABLE" }));

    if let Some(models) = value.get("models").and_then(Value::as_array) {
        lines.push(format!("Found {} model(s):", models.len()));
        for (i, m) in models.iter().take(5).enumerate() {
            lines.push(format!("  Model {}: {}", i + 1, m));
        }
        if models.len() > 5 {
            lines.push(format!("  ... and {} more", models.len() - 5));
        }
    }

    if let Some(stats) = value.get("statistics").and_then(Value::as_object) {
        lines.push("Statistics:".to_string());
        for (k, v) in stats {
            lines.push(format!("  {k}: {v}"));
        }
    }

    lines.join("\n")
}

/// `formula,logic,satisfiable,model_count` plus one column per atom
/// appearing in the first model, one row per model (or a single row with
/// no atom columns when there are no models).
fn render_csv(value: &Value) -> String {
    let formula = value["formula"].as_str().unwrap_or("");
    let logic = value["logic"].as_str().unwrap_or("");
    let satisfiable = value["satisfiable"].as_bool().unwrap_or(false);
    let models = value.get("models").and_then(Value::as_array).cloned().unwrap_or_default();

    let mut atoms: Vec<String> = Vec::new();
    if let Some(first) = models.first().and_then(Value::as_object) {
        atoms = first.keys().filter(|k| k.as_str() != "domain").cloned().collect();
        atoms.sort();
    }

    let mut header = vec!["formula".to_string(), "logic".to_string(), "satisfiable".to_string(), "model_count".to_string()];
    header.extend(atoms.iter().cloned());
    let mut rows = vec![header.join(",")];

    if models.is_empty() {
        rows.push(format!("{formula},{logic},{satisfiable},0"));
    } else {
        for m in &models {
            let mut row = vec![formula.to_string(), logic.to_string(), satisfiable.to_string(), models.len().to_string()];
            for atom in &atoms {
                row.push(m.get(atom).and_then(Value::as_str).unwrap_or("").to_string());
            }
            rows.push(row.join(","));
        }
    }
    rows.join("\n")
}

fn process_file(path: &PathBuf, logic: &LogicPlugin, cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let formulas: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    println!("Processing {} formulas from {}", formulas.len(), path.display());
    println!("Logic system: {}", logic.name);
    println!("Sign: {}", cli.sign);
    println!("{}", "=".repeat(50));

    for (i, text) in formulas.iter().enumerate() {
        println!("\nFormula {}: {}", i + 1, text);
        let outcome = process_one(text, logic, cli);
        match &outcome {
            Ok(value) => {
                let satisfiable = value["satisfiable"].as_bool().unwrap_or(false);
                println!("  Result: {}", if satisfiable { "SAT" } else { "UNSAT" });
                if let Some(models) = value.get("models").and_then(Value::as_array) {
                    println!("  Models: {}", models.len());
                }
            }
            Err(e) => println!("  Error: {e}"),
        }
        if !matches!(cli.format, OutputFormat::Default) {
            print_outcome(&outcome, cli.format);
        }
    }
    Ok(())
}

fn process_batch(logic: &LogicPlugin, cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let formulas: Vec<String> = stdin
        .lock()
        .lines()
        .map_while(|l| l.ok())
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    if formulas.is_empty() {
        println!("No formulas provided.");
        return Ok(());
    }

    println!("Processing {} formulas in batch mode", formulas.len());
    println!("Logic: {}, Sign: {}", logic.name, cli.sign);
    for (i, text) in formulas.iter().enumerate() {
        println!("\n{}. {}", i + 1, text);
        let outcome = process_one(text, logic, cli);
        print_outcome(&outcome, cli.format);
    }
    Ok(())
}

/// A line-oriented REPL: every line is solved against the session's
/// current logic/sign, with `logic <name>`, `sign <symbol>`, `logics`, and
/// `quit`/`exit` as the only special commands.
fn interactive(cli: &Cli) -> Result<ExitCode> {
    let mut logic_name = cli.logic.clone();
    let mut sign_text = cli.sign.clone();
    println!("tableaux — semantic-tableau satisfiability checker");
    println!("Current logic: {logic_name}. Type 'logics', 'logic <name>', 'sign <symbol>', or 'quit'.");

    let stdin = io::stdin();
    loop {
        print!("tableau[{logic_name}]> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("logics") {
            list_logics();
            continue;
        }
        if let Some(rest) = line.strip_prefix("logic ") {
            match LogicRegistry::global().get(rest.trim()) {
                Ok(plugin) => {
                    logic_name = plugin.name.to_string();
                    println!("Switched to {logic_name}");
                }
                Err(e) => println!("Error: {e}"),
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("sign ") {
            sign_text = rest.trim().to_string();
            println!("Sign set to {sign_text}");
            continue;
        }

        let Ok(logic) = LogicRegistry::global().get(&logic_name) else {
            bail!("current logic '{logic_name}' vanished from the registry");
        };
        let session_cli = Cli { formula: None, sign: sign_text.clone(), logic: logic_name.clone(), ..clone_flags(cli) };
        let outcome = process_one(line, &logic, &session_cli);
        print_outcome(&outcome, cli.format);
    }
    Ok(ExitCode::SUCCESS)
}

fn clone_flags(cli: &Cli) -> Cli {
    Cli {
        formula: cli.formula.clone(),
        logic: cli.logic.clone(),
        sign: cli.sign.clone(),
        models: cli.models,
        stats: cli.stats,
        format: cli.format,
        file: cli.file.clone(),
        batch: cli.batch,
        max_models: cli.max_models,
        validate_only: cli.validate_only,
        list_logics: cli.list_logics,
        debug: cli.debug,
    }
}
