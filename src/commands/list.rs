//! List command handler.

use clap::{Parser, ValueEnum};
use error_injector::{FaultInjector, InjectorConfiguration};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One section per kind, one name per line
    #[default]
    Text,
    /// The injector configuration as YAML
    Yaml,
}

#[derive(Parser, Clone, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

/// Render the registered generators, distributions and injection modes.
pub fn render_list(format: ListFormat) -> anyhow::Result<String> {
    let info = FaultInjector::new().configuration();
    match format {
        ListFormat::Text => Ok(render_text(&info)),
        ListFormat::Yaml => Ok(serde_yaml::to_string(&info)?),
    }
}

fn render_text(info: &InjectorConfiguration) -> String {
    let sections = [
        ("Generators", &info.generators),
        ("Real distributions", &info.real_distributions),
        ("Integer distributions", &info.integer_distributions),
        ("Injection modes", &info.injection_modes),
    ];

    let mut out = String::new();
    for (title, names) in sections {
        out.push_str(title);
        out.push_str(":\n");
        for name in names {
            out.push_str("  ");
            out.push_str(name);
            out.push('\n');
        }
    }
    out
}

/// Run the list command.
pub fn run_list(args: ListArgs) -> anyhow::Result<()> {
    print!("{}", render_list(args.format)?);
    Ok(())
}
