#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    Analyze { address: String },
}

pub fn parse_args<I>(mut args: I) -> std::result::Result<Command, String>
where
    I: Iterator<Item = String>,
{
    // Drop argv[0].
    let _ = args.next();

    let Some(cmd) = args.next() else {
        return Ok(Command::Serve);
    };

    match cmd.as_str() {
        "serve" => Ok(Command::Serve),
        "analyze" => {
            let address = args
                .next()
                .ok_or_else(|| "usage: web analyze <address>".to_string())?;
            Ok(Command::Analyze { address })
        }
        other => Err(format!("unknown command: {other}")),
    }
}
