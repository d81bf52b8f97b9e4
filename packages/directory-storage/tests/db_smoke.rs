use time::macros::datetime;
use uuid::Uuid;

use directory_config::Postgres;
use directory_storage::{
	Error,
	db::Db,
	queries::{self, NewBuilding, NewOrganization},
};
use directory_testkit::TestDatabase;

async fn bootstrap(test_db: &TestDatabase) -> Db {
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 2 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external PostGIS. Set DIRECTORY_PG_DSN to run."]
async fn schema_bootstrap_is_idempotent() {
	let Some(base_dsn) = directory_testkit::env_dsn() else {
		eprintln!(
			"Skipping schema_bootstrap_is_idempotent; set DIRECTORY_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	db.ensure_schema().await.expect("Second bootstrap must succeed.");

	for table in [
		"buildings",
		"activities",
		"organizations",
		"organization_activities",
		"organization_phone_numbers",
	] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "Missing table {table}.");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external PostGIS. Set DIRECTORY_PG_DSN to run."]
async fn organization_detail_reads_building_activities_and_phones() {
	let Some(base_dsn) = directory_testkit::env_dsn() else {
		eprintln!(
			"Skipping organization_detail_reads_building_activities_and_phones; \
			 set DIRECTORY_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;
	let building_id = Uuid::new_v4();
	let food = Uuid::new_v4();
	let meat = Uuid::new_v4();
	let organization_id = Uuid::new_v4();

	queries::insert_building(
		&db,
		&NewBuilding {
			building_id,
			address: "Moscow, Lenina 1, office 3",
			latitude: 55.75,
			longitude: 37.60,
			created_at: datetime!(2025-01-01 00:00:00 UTC),
		},
	)
	.await
	.expect("Failed to insert building.");
	queries::insert_activity(&db, food, "Food", None).await.expect("Failed to insert activity.");
	queries::insert_activity(&db, meat, "Meat", Some(food))
		.await
		.expect("Failed to insert activity.");
	queries::insert_organization(
		&db,
		&NewOrganization {
			organization_id,
			name: "Horns and Hooves",
			building_id: Some(building_id),
			created_at: datetime!(2025-01-02 00:00:00 UTC),
		},
	)
	.await
	.expect("Failed to insert organization.");
	queries::link_organization_activity(&db, organization_id, meat)
		.await
		.expect("Failed to link activity.");
	queries::link_organization_activity(&db, organization_id, food)
		.await
		.expect("Failed to link activity.");
	queries::insert_phone_number(&db, organization_id, "8-923-666-13-13")
		.await
		.expect("Failed to insert phone number.");
	queries::insert_phone_number(&db, organization_id, "2-222-222")
		.await
		.expect("Failed to insert phone number.");

	let detail = queries::fetch_organization_detail(&db, organization_id)
		.await
		.expect("Failed to fetch organization.")
		.expect("Organization must exist.");

	assert_eq!(detail.building_id, Some(building_id));
	assert!((detail.latitude.expect("latitude") - 55.75).abs() < 1e-9);
	assert!((detail.longitude.expect("longitude") - 37.60).abs() < 1e-9);

	let names: Vec<&str> = detail.activities.0.iter().map(|a| a.name.as_str()).collect();

	assert_eq!(names, vec!["Food", "Meat"]);
	assert_eq!(detail.activities.0[1].parent_id, Some(food));

	let phones = queries::fetch_phone_numbers(&db, organization_id)
		.await
		.expect("Failed to fetch phone numbers.");
	let phones: Vec<&str> = phones.iter().map(|p| p.phone_number.as_str()).collect();

	assert_eq!(phones, vec!["2-222-222", "8-923-666-13-13"]);

	let missing = queries::fetch_organization_detail(&db, Uuid::new_v4())
		.await
		.expect("Failed to fetch organization.");

	assert!(missing.is_none());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external PostGIS. Set DIRECTORY_PG_DSN to run."]
async fn organization_without_building_has_empty_location() {
	let Some(base_dsn) = directory_testkit::env_dsn() else {
		eprintln!(
			"Skipping organization_without_building_has_empty_location; \
			 set DIRECTORY_PG_DSN to run this test."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;
	let organization_id = Uuid::new_v4();

	queries::insert_organization(
		&db,
		&NewOrganization {
			organization_id,
			name: "Nomad Deliveries",
			building_id: None,
			created_at: datetime!(2025-01-03 00:00:00 UTC),
		},
	)
	.await
	.expect("Failed to insert organization.");

	let detail = queries::fetch_organization_detail(&db, organization_id)
		.await
		.expect("Failed to fetch organization.")
		.expect("Organization must exist.");

	assert!(detail.building_id.is_none());
	assert!(detail.address.is_none());
	assert!(detail.activities.0.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external PostGIS. Set DIRECTORY_PG_DSN to run."]
async fn activity_cannot_parent_itself() {
	let Some(base_dsn) = directory_testkit::env_dsn() else {
		eprintln!("Skipping activity_cannot_parent_itself; set DIRECTORY_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;
	let activity_id = Uuid::new_v4();
	let err = queries::insert_activity(&db, activity_id, "Loop", Some(activity_id))
		.await
		.expect_err("Self-parenting must be rejected.");

	assert!(matches!(err, Error::InvalidArgument(_)));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
