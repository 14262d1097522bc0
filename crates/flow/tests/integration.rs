//! End-to-end transaction runs through the full stage pipeline.

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use moneyflow_core::{Account, Currency, CurrencyAmount};
use moneyflow_dsl::{Destination, SplitBuilder};
use moneyflow_flow::{FlowError, FlowInput, TransactionFlow, TransactionResults};
use moneyflow_ledger::LedgerError;
use moneyflow_policy::Expr;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn usd_dest(id: &str) -> Destination {
    Destination::account(Account::empty(id, Currency::Usd), "")
}

fn balance(results: &TransactionResults, account: &str) -> Decimal {
    results
        .balances
        .iter()
        .find(|b| b.account == account)
        .map(|b| b.balance)
        .unwrap_or_else(|| panic!("no balance for {}", account))
}

#[test]
fn test_remainder_moves_everything() -> Result<()> {
    // source 1000, a single remainder: destination ends at 1000, source at 0
    init_tracing();
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("source", CurrencyAmount::usd(dec!(1000)));
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("source")
            .destination(SplitBuilder::new().remainder(usd_dest("destination")).build(""));
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;

    assert_eq!(balance(&results, "destination"), dec!(1000));
    assert_eq!(balance(&results, "source"), dec!(0));
    Ok(())
}

#[test]
fn test_percentage_plus_remainder() -> Result<()> {
    // 10% to the platform, the rest to the merchant
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(1000)))
            .metadata("volume", 1500);
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .tag("commission")
                    .percentage(dec!(10), usd_dest("platform"))
                    .remainder(usd_dest("merchant"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|c| {
        let enabled = c.eval(&Expr::param("volume").gt(1000))?;
        c.apply_tag("commission", enabled);
        Ok(())
    })?;

    assert_eq!(results.postings[0].amount, dec!(100));
    assert_eq!(results.postings[0].tag, "commission");
    assert_eq!(results.postings[1].amount, dec!(900));
    assert_eq!(balance(&results, "platform"), dec!(100));
    assert_eq!(balance(&results, "merchant"), dec!(900));
    Ok(())
}

#[test]
fn test_percentage_cap_applies_upper_bound() -> Result<()> {
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(1000)));
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .percentage_cap(dec!(70), dec!(500), dec!(100), usd_dest("fee"))
                    .remainder(usd_dest("merchant"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;

    // raw 700 is forced down to the upper bound
    assert_eq!(results.postings[0].amount, dec!(500));
    assert_eq!(balance(&results, "fee"), dec!(500));
    Ok(())
}

#[test]
fn test_overdraft_success_and_failure() -> Result<()> {
    // balance 100, limit 500: a 300 debit lands at -200
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account_with_overdraft("buyer", CurrencyAmount::usd(dec!(100)), dec!(500));
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(300)))
            .source("buyer")
            .destination(usd_dest("merchant"));
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;
    assert_eq!(balance(&results, "buyer"), dec!(-200));

    // same limit, a 700 debit breaches it
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account_with_overdraft("buyer", CurrencyAmount::usd(dec!(100)), dec!(500));
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(700)))
            .source("buyer")
            .destination(usd_dest("merchant"));
        Ok(())
    })?;
    let result = flow.condition(|_| Ok(()));
    assert!(matches!(
        result,
        Err(FlowError::Ledger(LedgerError::OverdraftExceeded { .. }))
    ));
    Ok(())
}

#[test]
fn test_nested_split_without_catch_all_drops_funds() -> Result<()> {
    // a 10% branch of 2000 carries 200; inside it only 60% is claimed, so
    // 80 vanishes and total posted stays 1920
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(2000)));
        Ok(())
    })?;
    flow.send(|s| {
        let inner = SplitBuilder::new()
            .percentage(dec!(60), usd_dest("a"))
            .build("");
        s.amount(CurrencyAmount::usd(dec!(2000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .percentage(dec!(10), inner)
                    .remainder(usd_dest("rest"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;

    assert_eq!(results.postings[0].amount, dec!(120));
    assert_eq!(results.postings[1].amount, dec!(1800));
    let posted: Decimal = results.postings.iter().map(|p| p.amount).sum();
    assert_eq!(posted, dec!(1920));

    // the dropped 80 was never posted, so it never left the buyer
    assert_eq!(balance(&results, "buyer"), dec!(80));
    assert_eq!(balance(&results, "a"), dec!(120));
    Ok(())
}

#[test]
fn test_conservation_with_catch_alls_everywhere() -> Result<()> {
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(2000)));
        Ok(())
    })?;
    flow.send(|s| {
        let inner = SplitBuilder::new()
            .percentage(dec!(60), usd_dest("a"))
            .remainder(usd_dest("b"))
            .build("");
        s.amount(CurrencyAmount::usd(dec!(2000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .percentage(dec!(10), inner)
                    .remainder(usd_dest("rest"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;

    let paid: Decimal = results
        .postings
        .iter()
        .filter(|p| p.source == "buyer")
        .map(|p| p.amount)
        .sum();
    assert_eq!(paid, dec!(2000));
    Ok(())
}

#[test]
fn test_tag_default_allow_and_explicit_disable() -> Result<()> {
    let send_stage = |flow: &mut TransactionFlow| -> Result<(), FlowError> {
        flow.send(|s| {
            s.amount(CurrencyAmount::usd(dec!(1000)))
                .source("buyer")
                .destination(
                    SplitBuilder::new()
                        .percentage(dec!(10), Destination::account(
                            Account::empty("platform", Currency::Usd),
                            "commission",
                        ))
                        .remainder(usd_dest("merchant"))
                        .build(""),
                );
            Ok(())
        })?;
        Ok(())
    };

    // never applied: the tagged branch posts
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(1000)));
        Ok(())
    })?;
    send_stage(&mut flow)?;
    let results = flow.condition(|_| Ok(()))?;
    assert_eq!(results.postings.len(), 2);

    // explicitly disabled: skipped, and the remainder takes everything
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(1000)));
        Ok(())
    })?;
    send_stage(&mut flow)?;
    let results = flow.condition(|c| {
        c.apply_tag("commission", false);
        Ok(())
    })?;
    assert_eq!(results.postings.len(), 1);
    assert_eq!(results.postings[0].amount, dec!(1000));
    assert_eq!(balance(&results, "merchant"), dec!(1000));
    Ok(())
}

#[test]
fn test_left_to_right_boolean_chaining() -> Result<()> {
    // (volume > 10000 AND active) OR tier == gold: the leading AND is false
    // but the trailing OR rescues the tag
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(1000)))
            .metadata("volume", 500)
            .metadata("active", true)
            .metadata("tier", "Gold");
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .tag("bonus")
                    .percentage(dec!(5), usd_dest("bonus-pool"))
                    .remainder(usd_dest("merchant"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|c| {
        let enabled = c.eval(
            &Expr::param("volume")
                .gt(10_000)
                .and(Expr::param("active").eq(true))
                .or(Expr::param("tier").eq("gold")),
        )?;
        c.apply_tag("bonus", enabled);
        Ok(())
    })?;

    assert_eq!(results.postings[0].amount, dec!(50));
    Ok(())
}

#[test]
fn test_posting_keys_are_deterministic() -> Result<()> {
    let run = || -> Result<TransactionResults, FlowError> {
        let mut flow = TransactionFlow::new();
        flow.given(|g| {
            g.account("buyer", CurrencyAmount::usd(dec!(1000)));
            Ok(())
        })?;
        flow.send(|s| {
            let inner = SplitBuilder::new()
                .percentage(dec!(50), usd_dest("x"))
                .remainder(usd_dest("y"))
                .build("");
            s.amount(CurrencyAmount::usd(dec!(1000)))
                .source("buyer")
                .destination(
                    SplitBuilder::new()
                        .percentage(dec!(10), usd_dest("a"))
                        .percentage(dec!(20), inner)
                        .exact(dec!(30), usd_dest("b"))
                        .source()
                        .build(""),
                );
            Ok(())
        })?;
        flow.condition(|_| Ok(()))
    };

    let first = run()?;
    let second = run()?;
    assert_eq!(first.postings, second.postings);

    let keys: Vec<&str> = first.postings.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["p0", "p1.p0", "p1.r0", "e0", "s0"]);
    Ok(())
}

#[test]
fn test_with_input_snapshot_run() -> Result<()> {
    let json = r#"{
        "accounts": [
            {"id": "buyer", "balance": "1000", "currency": "USD"}
        ],
        "metadata": {"volume": {"int": 1500}},
        "variables": {"%%cut%%": {"number": "12.5"}}
    }"#;
    let input: FlowInput = serde_json::from_str(json)?;

    let mut flow = TransactionFlow::with_input(input)?;
    flow.send(|s| {
        let cut = s.var_number("%%cut%%")?;
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .percentage(cut, usd_dest("platform"))
                    .remainder(usd_dest("merchant"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|c| {
        let enabled = c.eval(&Expr::param("volume").gte(1000))?;
        c.apply_tag("cut", enabled);
        Ok(())
    })?;

    assert_eq!(results.postings[0].amount, dec!(125.0));

    // the export carries both sections
    let json = results.to_json()?;
    assert!(json.contains("postings"));
    assert!(json.contains("balances"));
    Ok(())
}

#[test]
fn test_snapshot_accounts_keep_opening_balance_as_initial() -> Result<()> {
    // an input account without an explicit initial_balance opens with
    // initial_balance == balance, and the balance report carries it through
    let json = r#"{
        "accounts": [
            {"id": "buyer", "balance": "1000", "currency": "USD"}
        ]
    }"#;
    let input: FlowInput = serde_json::from_str(json)?;

    let mut flow = TransactionFlow::with_input(input)?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("buyer")
            .destination(usd_dest("merchant"));
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;

    let buyer = results
        .balances
        .iter()
        .find(|b| b.account == "buyer")
        .expect("buyer balance record");
    assert_eq!(buyer.balance, dec!(0));
    assert_eq!(buyer.initial_balance, dec!(1000));
    Ok(())
}

#[test]
fn test_bad_placeholder_in_input_rejected() {
    let input = FlowInput {
        accounts: vec![Account::new("buyer", dec!(100), Currency::Usd)],
        variables: [("cut".to_string(), dec!(10).into())].into_iter().collect(),
        ..Default::default()
    };
    assert!(matches!(
        TransactionFlow::with_input(input),
        Err(FlowError::Dsl(_))
    ));
}

#[test]
fn test_insufficient_funds_surface_through_flow() -> Result<()> {
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(50)));
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(100)))
            .source("buyer")
            .destination(usd_dest("merchant"));
        Ok(())
    })?;
    let result = flow.condition(|_| Ok(()));
    assert!(matches!(
        result,
        Err(FlowError::Ledger(LedgerError::InsufficientFunds { .. }))
    ));
    Ok(())
}

#[test]
fn test_report_rendering() -> Result<()> {
    let mut flow = TransactionFlow::new();
    flow.given(|g| {
        g.account("buyer", CurrencyAmount::usd(dec!(1000)));
        Ok(())
    })?;
    flow.send(|s| {
        s.amount(CurrencyAmount::usd(dec!(1000)))
            .source("buyer")
            .destination(
                SplitBuilder::new()
                    .percentage(dec!(10), usd_dest("platform"))
                    .remainder(usd_dest("merchant"))
                    .build(""),
            );
        Ok(())
    })?;
    let results = flow.condition(|_| Ok(()))?;

    let table = results.render_postings();
    assert!(table.lines().count() == results.postings.len() + 1);
    assert!(table.contains("platform"));

    let balances = results.render_balances();
    assert!(balances.contains("merchant"));
    assert!(balances.contains("900"));
    Ok(())
}
