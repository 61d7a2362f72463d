use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use super::WidgetFamily;

#[derive(Parser, Debug)]
#[command(name = "lifeprogress-widget", version)]
#[command(about = "Renders the life progress widget from the shared storage area")]
pub struct WidgetArgs {
    #[arg(
        long,
        help = "Application directory. By default tries to read from $XDG_STATE_HOME or $HOME/.local/state"
    )]
    pub dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = WidgetFamily::Small)]
    pub family: WidgetFamily,
    #[arg(long, help = "Print the widget data as JSON instead of drawing it")]
    pub json: bool,
    #[arg(long, help = "Keep running and redraw at every midnight")]
    pub watch: bool,
    #[arg(long, help = "Disable colours")]
    pub plain: bool,
    /// This option is for debugging purposes only.
    #[arg(long = "log-console")]
    pub log_console: bool,
    #[arg(long = "log-filter")]
    pub log: Option<LevelFilter>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tracing::level_filters::LevelFilter;

    use crate::widget::WidgetFamily;

    use super::WidgetArgs;

    #[test]
    fn parses_family_and_filter() {
        let args = WidgetArgs::parse_from([
            "lifeprogress-widget",
            "--family",
            "large",
            "--log-filter",
            "debug",
            "--plain",
        ]);
        assert_eq!(args.family, WidgetFamily::Large);
        assert_eq!(args.log, Some(LevelFilter::DEBUG));
        assert!(args.plain);
        assert!(!args.watch);

        let defaults = WidgetArgs::parse_from(["lifeprogress-widget"]);
        assert_eq!(defaults.family, WidgetFamily::Small);
        assert_eq!(defaults.dir, None);
    }
}
