//! Command-line interface for wsdl

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
use wsdl::limits::Limits;
#[cfg(feature = "cli")]
use wsdl::loaders::{Loader, Location};
#[cfg(feature = "cli")]
use wsdl::session::WsdlSession;
#[cfg(feature = "cli")]
use wsdl::wsdl::{TypeKind, WsdlDocument, WsdlParser, WsdlType};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "wsdl")]
#[command(author, version, about = "WSDL inspection tool", long_about = None)]
struct Cli {
    /// Resource limits applied while loading
    #[arg(long, global = true, value_enum, default_value_t = LimitsPreset::Default)]
    limits: LimitsPreset,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(ValueEnum, Clone, Copy, Debug)]
enum LimitsPreset {
    Default,
    Strict,
    Permissive,
}

#[cfg(feature = "cli")]
impl LimitsPreset {
    fn limits(self) -> Limits {
        match self {
            LimitsPreset::Default => Limits::default(),
            LimitsPreset::Strict => Limits::strict(),
            LimitsPreset::Permissive => Limits::permissive(),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a WSDL document
    Inspect {
        /// Path or file:// URL of the WSDL document
        #[arg(value_name = "FILE")]
        file: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the operations exposed by each service and port
    Operations {
        /// Path or file:// URL of the WSDL document
        #[arg(value_name = "FILE")]
        file: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show a schema type and what references it
    Type {
        /// Path or file:// URL of the WSDL document
        #[arg(value_name = "FILE")]
        file: String,

        /// Type name
        #[arg(value_name = "NAME")]
        name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show a message, its parts and the operations using it
    Message {
        /// Path or file:// URL of the WSDL document
        #[arg(value_name = "FILE")]
        file: String,

        /// Message name
        #[arg(value_name = "NAME")]
        name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the full parse result as JSON
    Dump {
        /// Path or file:// URL of the WSDL document
        #[arg(value_name = "FILE")]
        file: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[cfg(feature = "cli")]
type CliResult = Result<(), Box<dyn std::error::Error>>;

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let limits = cli.limits.limits();

    let result = match cli.command {
        Commands::Inspect { file, json } => cmd_inspect(&load(&file, limits), json),
        Commands::Operations { file, json } => cmd_operations(&load(&file, limits), json),
        Commands::Type { file, name, json } => cmd_type(&load(&file, limits), &name, json),
        Commands::Message { file, name, json } => {
            cmd_message(&load(&file, limits), &name, json)
        }
        Commands::Dump { file, pretty } => cmd_dump(&load_any(&file, limits), pretty),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Load `source` into a session, whatever the outcome
#[cfg(feature = "cli")]
fn load_any(source: &str, limits: Limits) -> WsdlSession {
    let mut session = WsdlSession::new()
        .with_parser(WsdlParser::new().with_limits(limits.clone()))
        .with_loader(Loader::new().with_limits(limits));

    match Location::parse(source) {
        Ok(Location::Url(url)) => session.load_from_url(url.as_str()),
        _ => session.load_from_file(source),
    };

    for warning in session.warnings() {
        eprintln!("warning: {}", warning);
    }
    session
}

/// Load `source`, exiting with the parse errors when no document results
#[cfg(feature = "cli")]
fn load(source: &str, limits: Limits) -> WsdlSession {
    let session = load_any(source, limits);
    if !session.has_document() {
        for error in session.errors() {
            eprintln!("Error: {}", error);
        }
        std::process::exit(1);
    }
    session
}

#[cfg(feature = "cli")]
fn cmd_inspect(session: &WsdlSession, json_output: bool) -> CliResult {
    let document = session.document().ok_or("no document loaded")?;

    if json_output {
        let json = serde_json::json!({
            "targetNamespace": document.target_namespace,
            "documentation": document.documentation,
            "statistics": {
                "services": document.services.len(),
                "portTypes": document.port_types.len(),
                "bindings": document.bindings.len(),
                "messages": document.messages.len(),
                "types": document.types.len(),
                "imports": document.imports.len(),
                "operations": session.operations().len(),
            },
            "services": document.services,
            "imports": document.imports,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_summary(document);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(document: &WsdlDocument) {
    println!("wsdl v{}", wsdl::VERSION);
    println!();
    println!("Document Information:");
    if document.target_namespace.is_empty() {
        println!("  Target Namespace: (none)");
    } else {
        println!("  Target Namespace: {}", document.target_namespace);
    }
    if !document.documentation.is_empty() {
        println!("  Documentation: {}", document.documentation);
    }
    println!();
    println!("Statistics:");
    println!("  Services: {}", document.services.len());
    println!("  Port Types: {}", document.port_types.len());
    println!("  Bindings: {}", document.bindings.len());
    println!("  Messages: {}", document.messages.len());
    println!("  Types: {}", document.types.len());
    println!("  Imports: {}", document.imports.len());

    if !document.services.is_empty() {
        println!("\n=== Services ===");
        for service in &document.services {
            println!("  {}", service.name);
            for port in &service.ports {
                println!(
                    "    {} [{}] {} -> {}",
                    port.name, port.protocol, port.address, port.binding
                );
            }
        }
    }

    if !document.imports.is_empty() {
        println!("\n=== Imports ===");
        for import in &document.imports {
            println!("  {} ({})", import.namespace, import.location);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_operations(session: &WsdlSession, json_output: bool) -> CliResult {
    let operations = session.operations();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&operations)?);
        return Ok(());
    }

    for record in &operations {
        println!(
            "{}/{}: {}",
            record.service_name, record.port_name, record.operation_name
        );
        if let Some(action) = &record.soap_action {
            println!("  SOAP Action: {}", action);
        }
        if let Some(input) = &record.input {
            println!("  Input: {}", input.message);
        }
        if let Some(output) = &record.output {
            println!("  Output: {}", output.message);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_type(session: &WsdlSession, name: &str, json_output: bool) -> CliResult {
    let wsdl_type = session
        .get_type_by_name(name)
        .ok_or_else(|| format!("Type '{}' not found in document", name))?;
    let refs = session.type_reverse_refs();
    let used_by = refs.get(name).map(Vec::as_slice).unwrap_or_default();

    if json_output {
        let json = serde_json::json!({
            "type": wsdl_type,
            "usedBy": used_by,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_type(wsdl_type);
    if !used_by.is_empty() {
        println!("  Used By:");
        for reference in used_by {
            let detail = reference.detail.as_deref().unwrap_or("");
            let via = if reference.indirect { " (via message)" } else { "" };
            println!("    {} {} {}{}", reference.kind, reference.name, detail, via);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_type(wsdl_type: &WsdlType) {
    println!("Type: {}", wsdl_type.name);
    println!("  Kind: {}", wsdl_type.kind);
    if !wsdl_type.namespace.is_empty() {
        println!("  Namespace: {}", wsdl_type.namespace);
    }
    if let Some(base) = &wsdl_type.base {
        let label = match wsdl_type.kind {
            TypeKind::Element => "Type",
            _ => "Base",
        };
        println!("  {}: {}", label, base);
    }
    if !wsdl_type.documentation.is_empty() {
        println!("  Documentation: {}", wsdl_type.documentation);
    }
    if !wsdl_type.fields.is_empty() {
        println!("  Fields:");
        for field in &wsdl_type.fields {
            let marker = if field.is_attribute { "@" } else { "" };
            println!(
                "    {}{} : {} [{}..{}]",
                marker, field.name, field.type_, field.min_occurs, field.max_occurs
            );
        }
    }
    if let Some(restriction) = &wsdl_type.restriction {
        println!("  Restriction of {}", restriction.base);
        if let Some(values) = &restriction.enumeration {
            println!("    Enumeration: {}", values.join(", "));
        }
        if let Some(pattern) = &restriction.pattern {
            println!("    Pattern: {}", pattern);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_message(session: &WsdlSession, name: &str, json_output: bool) -> CliResult {
    let message = session
        .get_message_by_name(name)
        .ok_or_else(|| format!("Message '{}' not found in document", name))?;
    let refs = session.message_reverse_refs();
    let used_by = refs.get(name).map(Vec::as_slice).unwrap_or_default();

    if json_output {
        let json = serde_json::json!({
            "message": message,
            "usedBy": used_by,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("Message: {}", message.name);
    if !message.documentation.is_empty() {
        println!("  Documentation: {}", message.documentation);
    }
    for part in &message.parts {
        let target = part
            .element
            .as_deref()
            .or(part.type_.as_deref())
            .unwrap_or("(untyped)");
        println!("  Part {} : {}", part.name, target);
    }
    for reference in used_by {
        println!("  {} of {}", reference.role, reference.operation_name);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_dump(session: &WsdlSession, pretty: bool) -> CliResult {
    let result = session.result().ok_or("no document loaded")?;

    let json_str = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{}", json_str);

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
