use tempfile::tempdir;
use trade_toolkit::journal::{JsonFileStore, NewTrade, TradeJournal, TradeStatus, TradeStore};

#[test]
fn journal_survives_reopen_through_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paperTrades.json");

    let expected = {
        let mut journal = TradeJournal::open(JsonFileStore::with_path(&path)).unwrap();
        assert!(journal.trades().is_empty());

        let first = journal
            .add_trade(&NewTrade::new("CE", "24500", "100").with_lot_size("20"))
            .unwrap();
        let second = journal
            .add_trade(&NewTrade::new("PE", "24000", "50").with_lot_size("75"))
            .unwrap();
        journal
            .add_trade(&NewTrade::new("CE", "24600", "80"))
            .unwrap();

        journal.mark_status(first.id, TradeStatus::Done).unwrap();
        journal.mark_status(second.id, TradeStatus::Close).unwrap();
        journal.trades().to_vec()
    };

    let reopened = TradeJournal::open(JsonFileStore::with_path(&path)).unwrap();
    assert_eq!(reopened.trades(), expected.as_slice());

    let totals = reopened.totals();
    // 2000 + 3750 + 1600
    assert_eq!(totals.total_invested, 7350.0);
    assert_eq!(totals.total_profit, 200.0);
    // 50 * 0.02 * 75
    assert_eq!(totals.total_loss, 75.0);
    assert_eq!(totals.final_adjusted_profit, 125.0);
}

#[test]
fn delete_is_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paperTrades.json");

    let mut journal = TradeJournal::open(JsonFileStore::with_path(&path)).unwrap();
    let trade = journal
        .add_trade(&NewTrade::new("CE", "24500", "100"))
        .unwrap();
    journal.mark_status(trade.id, TradeStatus::Done).unwrap();
    journal.delete(trade.id).unwrap();

    let stored = JsonFileStore::with_path(&path).load().unwrap();
    assert!(stored.is_empty());
    assert_eq!(journal.totals().total_profit, 0.0);
}

#[test]
fn persisted_format_uses_storage_field_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paperTrades.json");

    let mut journal = TradeJournal::open(JsonFileStore::with_path(&path)).unwrap();
    journal
        .add_trade(&NewTrade::new("PE", "22000", "100"))
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];

    assert_eq!(record["optionType"], "PE");
    assert_eq!(record["strikePrice"], "22000");
    assert_eq!(record["lotSize"], 20);
    assert_eq!(record["profitWhole"], 200.0);
    assert_eq!(record["status"], "pending");
}

#[test]
fn huge_premium_still_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paperTrades.json");

    let mut journal = TradeJournal::open(JsonFileStore::with_path(&path)).unwrap();
    let trade = journal
        .add_trade(&NewTrade::new("CE", "24500", "1e307").with_lot_size("1"))
        .unwrap();

    assert!(trade.lot_size_amount.is_finite());
    assert!(trade.stop_loss_per_qty.is_finite());
    assert!(trade.target_per_qty.is_finite());

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("null"));

    let reopened = TradeJournal::open(JsonFileStore::with_path(&path)).unwrap();
    assert_eq!(reopened.trades().len(), 1);
    let stored = &reopened.trades()[0];
    assert_eq!(stored.id, trade.id);
    assert_eq!(stored.status, TradeStatus::Pending);
    assert!(stored.profit_whole.is_finite());
    assert!((stored.premium_price - 1e307).abs() <= 1e307 * 1e-12);
}
