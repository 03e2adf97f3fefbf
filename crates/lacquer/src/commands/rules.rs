//! Rules command - List built-in rules or print the configuration schema

use clap::Args;
use lacquer_patina::{builtin_rules, config_schema, RuleMeta};

#[derive(Args)]
pub struct RulesArgs {
    /// Print the JSON Schema of `lacquer.config.json` instead of the rule list
    #[arg(long)]
    pub schema: bool,
}

/// One line per rule: `name  [recommended] [fixable]  description`
fn rule_line(meta: &RuleMeta, width: usize) -> String {
    let recommended = if meta.is_recommended() { "✓" } else { " " };
    let fixable = if meta.fixable { "🔧" } else { "  " };
    format!(
        "{recommended} {fixable} {:<width$}  {}",
        meta.name, meta.description
    )
}

pub fn run(args: RulesArgs) {
    if args.schema {
        match serde_json::to_string_pretty(&config_schema()) {
            Ok(schema) => println!("{schema}"),
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m Failed to serialize schema: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let rules = builtin_rules();
    let width = rules.iter().map(|f| f.meta.name.len()).max().unwrap_or(0);
    for factory in rules {
        println!("{}", rule_line(factory.meta, width));
    }
    println!("\n✓ recommended  🔧 fixable");
}
