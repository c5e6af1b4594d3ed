use pretty_assertions::assert_eq;

use hail_core::db::{StoreConfig, StoreFactory};
use hail_core::{DentSize, EstimateRecord, Ledger, NewEstimateRecord, PanelType};
use hail_db_sqlite::SqliteStoreFactory;

fn record(
    name: &str,
    cost: &str,
    at: i64,
) -> EstimateRecord {
    EstimateRecord::create_at(
        NewEstimateRecord {
            customer_name: name.to_string(),
            vehicle_id: "2T1BURHE0JC074512".to_string(),
            panel_type: PanelType::Lfd,
            dent_size: DentSize::Quarter,
            dent_count: 18,
            is_aluminum: false,
            cost_result: cost.to_string(),
        },
        at,
    )
    .unwrap()
}

#[tokio::test]
async fn ledger_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        backend: "sqlite".to_string(),
        location: dir.path().join("hail.db").to_string_lossy().into_owned(),
        ..StoreConfig::default()
    };

    {
        let ledger = Ledger::new(SqliteStoreFactory.create(&config).await.unwrap());
        ledger.append(record("Priya", "$325.00", 1)).await;
        ledger
            .append(record("Priya", "CR: Custom Repair Needed", 2))
            .await;
    }

    let ledger = Ledger::new(SqliteStoreFactory.create(&config).await.unwrap());
    let summaries = ledger.grouped_summaries().await;

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].records().len(), 2);
    assert_eq!(summaries[0].total_cost().to_string(), "325.00");
}

#[tokio::test]
async fn clear_empties_the_slot() {
    let config = StoreConfig {
        backend: "sqlite".to_string(),
        location: ":memory:".to_string(),
        ..StoreConfig::default()
    };
    let ledger = Ledger::new(SqliteStoreFactory.create(&config).await.unwrap());
    ledger.append(record("Priya", "$325.00", 1)).await;

    ledger.clear().await;

    assert!(ledger.load_all().await.is_empty());
}
