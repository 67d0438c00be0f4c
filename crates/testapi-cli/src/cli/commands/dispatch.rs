use super::super::args::*;
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.global.config();
    match cli.cmd {
        Command::Report(args) => super::report::run(args, config).await,
        Command::Applications(args) => match args.cmd {
            ApplicationsSub::List(list_args) => super::applications::list(list_args, config).await,
            ApplicationsSub::Submit(submit_args) => {
                super::applications::submit(submit_args, config).await
            }
        },
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
