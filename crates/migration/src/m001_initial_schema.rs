use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m001_initial_schema"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(UP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DOWN_SQL)
            .await?;
        Ok(())
    }
}

// All tables are externally owned: the ingestion pipeline that fills them is
// out of scope, so the schema is created idempotently and never written to
// by this service. "SlackMessage" and "Statistics" keep the PascalCase
// identifiers the ingestion side uses.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS team_data (
    id INTEGER PRIMARY KEY,
    team_id TEXT NOT NULL,
    name TEXT NOT NULL,
    status TEXT,
    date TEXT
);
CREATE INDEX IF NOT EXISTS idx_team_data_team_id ON team_data(team_id);

CREATE TABLE IF NOT EXISTS sales_data (
    id INTEGER PRIMARY KEY,
    team_id TEXT NOT NULL,
    name TEXT NOT NULL,
    status TEXT,
    date TEXT
);
CREATE INDEX IF NOT EXISTS idx_sales_data_team_id ON sales_data(team_id);

CREATE TABLE IF NOT EXISTS "SlackMessage" (
    id INTEGER PRIMARY KEY,
    "Alarm" TEXT NOT NULL,
    "Region" TEXT NOT NULL,
    "NodeName" TEXT,
    "DateTime" TEXT NOT NULL,
    "Status" TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_slack_message_datetime ON "SlackMessage"("DateTime");

CREATE TABLE IF NOT EXISTS "Statistics" (
    id INTEGER PRIMARY KEY,
    "RegionName" TEXT NOT NULL,
    "AlarmName" TEXT NOT NULL,
    "AlarmMonth" TEXT NOT NULL,
    "Day" INTEGER NOT NULL,
    "Count" INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_statistics_month ON "Statistics"("AlarmMonth");
"#;

const DOWN_SQL: &str = r#"
DROP TABLE IF EXISTS "Statistics";
DROP TABLE IF EXISTS "SlackMessage";
DROP TABLE IF EXISTS sales_data;
DROP TABLE IF EXISTS team_data;
"#;
