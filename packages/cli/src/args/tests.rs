use super::*;
use clap::Parser;

#[test]
fn parse_status() {
    let args = CliArgs::try_parse_from([
        "meridian-cli",
        "status",
        "--network",
        "mainnet",
        "--block",
        "21000000",
    ])
    .unwrap();

    assert!(matches!(args.command, Command::Status));
    assert_eq!(args.env.network.as_deref(), Some("mainnet"));
    assert_eq!(args.env.block, Some(21000000));
}

#[test]
fn parse_interact_with_gas() {
    let args = CliArgs::try_parse_from([
        "meridian-cli",
        "interact",
        "--gas-price",
        "2.5",
        "--gas-limit",
        "500000",
    ])
    .unwrap();

    assert!(matches!(args.command, Command::Interact));
    assert_eq!(args.env.gas_price, Some(2.5));
    assert_eq!(args.env.gas_limit, Some(500000));
}

#[test]
fn parse_comma_separated_lists() {
    let args = CliArgs::try_parse_from([
        "meridian-cli",
        "status",
        "--currency-keys",
        "mUSD,mBTC",
        "--log-level",
        "info,meridian_cli=debug",
    ])
    .unwrap();

    assert_eq!(args.env.currency_keys, vec!["mUSD", "mBTC"]);
    assert_eq!(args.env.log_level, vec!["info", "meridian_cli=debug"]);
}

#[test]
fn global_args_work_before_the_subcommand() {
    let args =
        CliArgs::try_parse_from(["meridian-cli", "--network", "sepolia", "status"]).unwrap();
    assert_eq!(args.env.network.as_deref(), Some("sepolia"));
}

#[test]
fn unset_args_serialize_empty() {
    // unset cli args must not mask config-file values when figment merges them
    let args = CliArgs::try_parse_from(["meridian-cli", "status"]).unwrap();
    let json = serde_json::to_value(&args.env).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(CliArgs::try_parse_from(["meridian-cli"]).is_err());
}
