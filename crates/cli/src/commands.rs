use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a filter would be pushed down to each backend
    Explain {
        #[arg(long, help = "Config file path")]
        config: String,

        #[arg(long, help = "Resource type: cluster, service, component, host, host_component")]
        resource: String,

        #[arg(long, help = "Path to the filter predicate as JSON")]
        filter: String,

        #[arg(long, help = "Print a readable summary instead of JSON")]
        text: bool,
    },
    /// List the resources matching a filter
    Query {
        #[arg(long, help = "Config file path")]
        config: String,

        #[arg(long, help = "Resource type: cluster, service, component, host, host_component")]
        resource: String,

        #[arg(long, help = "Path to the filter predicate as JSON; omit to list everything")]
        filter: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the JSON result to this file instead of stdout"
        )]
        output: Option<String>,
    },
    CheckConfig {
        #[arg(long, help = "Config file path")]
        config: String,
    },
}
