use markup_vdom::node::{from_json_str, from_yaml_str};
use markup_vdom::{ConvertError, ConvertOptions, Converter, UnhandledNodePolicy, VDom, VNode};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

struct Args {
    files: Vec<String>,
    options: ConvertOptions,
    compact: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    let mut exit_code = 0;

    for file_path in &args.files {
        match convert_file(file_path, &args.options) {
            Ok(vnodes) => {
                let rendered = if args.compact {
                    serde_json::to_string(&vnodes)
                } else {
                    serde_json::to_string_pretty(&vnodes)
                };
                match rendered {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("✗ {}: failed to serialize output: {}", file_path, e);
                        exit_code = 1;
                    }
                }
            }
            Err(e) => {
                eprintln!("✗ {} could not be converted:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: vdom-convert [--strict] [--max-depth N] [--compact] <tree.json|tree.yaml>...");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  vdom-convert page.json");
    eprintln!("  vdom-convert --strict --max-depth 256 *.json");
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args {
        files: Vec::new(),
        options: ConvertOptions::default(),
        compact: false,
    };

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--strict" => args.options.unhandled = UnhandledNodePolicy::Reject,
            "--compact" => args.compact = true,
            "--max-depth" => {
                let value = raw.next().ok_or("--max-depth requires a value")?;
                let depth = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --max-depth '{}': must be a number", value))?;
                args.options.max_depth = Some(depth);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            _ => args.files.push(arg),
        }
    }

    if args.files.is_empty() {
        return Err("no input files".to_string());
    }
    Ok(args)
}

fn convert_file(path: &str, options: &ConvertOptions) -> Result<Vec<VNode<()>>, ConvertError> {
    let content = fs::read_to_string(path)?;

    // Parser dumps are JSON unless the extension says YAML
    let is_yaml = matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let roots = if is_yaml {
        from_yaml_str(&content)?
    } else {
        from_json_str(&content)?
    };

    Converter::new(VDom::new())
        .with_options(options.clone())
        .convert_all(&roots, None, None)
}

fn print_error(error: &ConvertError) {
    match error {
        ConvertError::UnhandledNode { kind } => {
            eprintln!("  Unhandled node type '{}'", kind);
            eprintln!("    Only tag, script and text nodes are converted (drop --strict to skip others)");
        }
        ConvertError::MaxNestingDepthExceeded { max_depth } => {
            eprintln!("  Maximum nesting depth ({}) exceeded", max_depth);
            eprintln!("    Elements are nested too deeply");
        }
        ConvertError::DeserializationError(msg) => {
            eprintln!("  Invalid parser dump:");
            eprintln!("    {}", msg);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
