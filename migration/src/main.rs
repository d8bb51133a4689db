// migration/src/main.rs

use migration::Migrator;
use sea_orm_migration::prelude::*;

// sea-orm-migration の CLI は async-std ランタイム上で動かす
#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
