//! Society provisioning, workers and overview tests

mod common;

use common::*;
use society_service::contract::*;

#[tokio::test]
async fn test_provision_creates_society_once_with_submitted_values() {
    print_test_header(
        "test_provision_creates_society_once_with_submitted_values",
        "One society insert carrying the form values as typed",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;

    let form = NewSociety {
        name: "  Green Meadows Phase II ".to_string(),
        ..new_society("ignored")
    };
    let provisioning = env
        .service
        .provision_society(&admin, form.clone())
        .await
        .unwrap();

    assert_eq!(MemoryStore::calls(&env.store.society_create_calls), 1);
    let stored = env.store.societies();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "  Green Meadows Phase II ");
    assert_eq!(stored[0].address, form.address);
    assert_eq!(stored[0].pincode, "560001");
    assert_eq!(stored[0].total_units, 24);
    assert_eq!(stored[0].created_by, admin.profile_id);
    assert_eq!(provisioning.society, stored[0]);
    assert!(provisioning.profile_linked);
    assert!(provisioning.failed_workers.is_empty());

    let profile = env.service.get_profile(&admin).await.unwrap();
    assert_eq!(profile.society_id, Some(provisioning.society.id));
    assert_eq!(env.events.names(), vec!["society_provisioned"]);
    println!("✅ Society stored once with verbatim values");
}

#[tokio::test]
async fn test_provision_store_failure_surfaces_store_message() {
    print_test_header(
        "test_provision_store_failure_surfaces_store_message",
        "A rejected society insert fails the call and skips follow-up writes",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    env.store
        .fail_society_create("duplicate key value violates unique constraint \"societies_name_key\"");

    let mut form = new_society("Green Meadows");
    form.workers = vec![new_worker("Raju", WorkerCategory::Plumber)];
    let err = env.service.provision_society(&admin, form).await.unwrap_err();

    match err {
        SocietyError::Storage { operation, message } => {
            assert_eq!(operation, "create society");
            assert_eq!(
                message,
                "duplicate key value violates unique constraint \"societies_name_key\""
            );
        }
        other => panic!("Expected Storage error, got {:?}", other),
    }

    assert_eq!(MemoryStore::calls(&env.store.society_create_calls), 1);
    assert_eq!(MemoryStore::calls(&env.store.worker_create_calls), 0);
    assert_eq!(MemoryStore::calls(&env.store.set_society_calls), 0);
    assert!(env.events.names().is_empty());
    println!("✅ Store message surfaced, no worker or profile writes");
}

#[tokio::test]
async fn test_provision_reports_failed_workers_without_failing() {
    print_test_header(
        "test_provision_reports_failed_workers_without_failing",
        "Worker insert failures are reported next to the created society",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    env.store.fail_worker("Suresh");

    let mut form = new_society("Green Meadows");
    form.workers = vec![
        new_worker("Raju", WorkerCategory::Plumber),
        new_worker("Suresh", WorkerCategory::Electrician),
        new_worker("Meena", WorkerCategory::Cleaner),
    ];
    let provisioning = env.service.provision_society(&admin, form).await.unwrap();

    let attached: Vec<&str> = provisioning.workers.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(attached, vec!["Raju", "Meena"]);
    assert_eq!(provisioning.failed_workers.len(), 1);
    assert_eq!(provisioning.failed_workers[0].name, "Suresh");
    assert!(provisioning.failed_workers[0]
        .reason
        .contains("utility_workers"));
    assert!(provisioning.profile_linked);

    assert_eq!(env.store.workers().len(), 2);
    assert!(env
        .store
        .workers()
        .iter()
        .all(|w| w.society_id == provisioning.society.id));
    println!("✅ Partial worker failure reported");
}

#[tokio::test]
async fn test_provision_profile_link_failure_keeps_society() {
    print_test_header(
        "test_provision_profile_link_failure_keeps_society",
        "A failed profile link still returns the created society",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    env.store.fail_set_society("connection reset by peer");

    let provisioning = env
        .service
        .provision_society(&admin, new_society("Green Meadows"))
        .await
        .unwrap();

    assert!(!provisioning.profile_linked);
    assert_eq!(env.store.societies().len(), 1);
    let profile = env.service.get_profile(&admin).await.unwrap();
    assert_eq!(profile.society_id, None);

    // The admin can still reach the society by naming it
    let society = env
        .service
        .get_society(&admin, provisioning.society.id)
        .await
        .unwrap();
    assert_eq!(society.id, provisioning.society.id);
    println!("✅ Society kept when the profile link fails");
}

#[tokio::test]
async fn test_provision_lists_every_missing_field() {
    print_test_header(
        "test_provision_lists_every_missing_field",
        "Blank required fields are reported together in form order",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;

    let form = NewSociety {
        name: " ".to_string(),
        address: String::new(),
        city: "Bengaluru".to_string(),
        state: String::new(),
        pincode: String::new(),
        total_units: 10,
        workers: Vec::new(),
    };
    let err = env.service.provision_society(&admin, form).await.unwrap_err();

    assert_eq!(
        err,
        SocietyError::MissingFields {
            fields: vec![
                "name".to_string(),
                "address".to_string(),
                "state".to_string(),
                "pincode".to_string(),
            ],
        }
    );
    assert_eq!(MemoryStore::calls(&env.store.society_create_calls), 0);
    println!("✅ Missing fields listed");
}

#[tokio::test]
async fn test_provision_rejects_invalid_forms_before_storing() {
    print_test_header(
        "test_provision_rejects_invalid_forms_before_storing",
        "Pincode, unit count and worker checks run before any insert",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;

    let mut bad_pincode = new_society("Green Meadows");
    bad_pincode.pincode = "5600".to_string();
    assert!(matches!(
        env.service.provision_society(&admin, bad_pincode).await,
        Err(SocietyError::Validation { .. })
    ));

    let mut no_units = new_society("Green Meadows");
    no_units.total_units = 0;
    assert!(matches!(
        env.service.provision_society(&admin, no_units).await,
        Err(SocietyError::Validation { .. })
    ));

    let mut bad_worker = new_society("Green Meadows");
    bad_worker.workers = vec![NewWorker {
        name: "Raju".to_string(),
        phone: "call me".to_string(),
        category: WorkerCategory::Plumber,
    }];
    assert!(matches!(
        env.service.provision_society(&admin, bad_worker).await,
        Err(SocietyError::Validation { .. })
    ));

    assert_eq!(MemoryStore::calls(&env.store.society_create_calls), 0);
    println!("✅ Invalid forms rejected up front");
}

#[tokio::test]
async fn test_provision_enforces_worker_limit() {
    print_test_header(
        "test_provision_enforces_worker_limit",
        "Forms with more workers than configured are rejected",
    );

    let mut config = test_config();
    config.max_workers_per_society = 2;
    let env = TestEnv::with_config(config);
    let admin = env.admin("admin@greenmeadows.in").await;

    let mut form = new_society("Green Meadows");
    form.workers = vec![
        new_worker("Raju", WorkerCategory::Plumber),
        new_worker("Suresh", WorkerCategory::Electrician),
        new_worker("Meena", WorkerCategory::Cleaner),
    ];
    let err = env.service.provision_society(&admin, form).await.unwrap_err();
    assert!(matches!(err, SocietyError::Validation { .. }));
    println!("✅ Worker limit enforced");
}

#[tokio::test]
async fn test_tenant_cannot_provision_society() {
    print_test_header(
        "test_tenant_cannot_provision_society",
        "Provisioning requires the admin role",
    );

    let env = TestEnv::new();
    let tenant = env.tenant("ravi@example.com", "Ravi", "Kumar").await;

    let err = env
        .service
        .provision_society(&tenant, new_society("Green Meadows"))
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Forbidden { .. }));
    assert_eq!(MemoryStore::calls(&env.store.society_create_calls), 0);
    println!("✅ Tenant provisioning forbidden");
}

#[tokio::test]
async fn test_admins_only_see_their_own_societies() {
    print_test_header(
        "test_admins_only_see_their_own_societies",
        "Society reads are scoped to the provisioning admin",
    );

    let env = TestEnv::new();
    let first = env.admin("first@example.com").await;
    let second = env.admin("second@example.com").await;
    let society = env.society(&first).await;

    let listed = env.service.list_societies(&first).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(env.service.list_societies(&second).await.unwrap().is_empty());

    let err = env.service.get_society(&second, society.id).await.unwrap_err();
    assert!(matches!(err, SocietyError::Forbidden { .. }));

    let err = env
        .service
        .get_society(&first, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::NotFound { .. }));
    println!("✅ Societies scoped to their admin");
}

#[tokio::test]
async fn test_update_society_applies_changed_fields() {
    print_test_header(
        "test_update_society_applies_changed_fields",
        "Only the fields present in the patch change",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;

    let updated = env
        .service
        .update_society(
            &admin,
            society.id,
            SocietyPatch {
                name: Some("Green Meadows Annexe".to_string()),
                total_units: Some(40),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Green Meadows Annexe");
    assert_eq!(updated.total_units, 40);
    assert_eq!(updated.city, society.city);
    assert!(updated.updated_at >= society.updated_at);

    let err = env
        .service
        .update_society(
            &admin,
            society.id,
            SocietyPatch {
                city: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SocietyError::MissingFields {
            fields: vec!["city".to_string()]
        }
    );
    println!("✅ Society patch applied");
}

#[tokio::test]
async fn test_worker_lifecycle() {
    print_test_header(
        "test_worker_lifecycle",
        "Admins add and remove workers; tenants can list them",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;

    let worker = env
        .service
        .add_worker(&admin, society.id, new_worker("Raju", WorkerCategory::Plumber))
        .await
        .unwrap();
    assert_eq!(worker.society_id, society.id);

    let visible = env.service.list_workers(&tenant, society.id).await.unwrap();
    assert_eq!(visible.len(), 1);

    let err = env
        .service
        .add_worker(&tenant, society.id, new_worker("Meena", WorkerCategory::Cleaner))
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Forbidden { .. }));

    env.service
        .remove_worker(&admin, society.id, worker.id)
        .await
        .unwrap();
    assert!(env.service.list_workers(&admin, society.id).await.unwrap().is_empty());

    let err = env
        .service
        .remove_worker(&admin, society.id, worker.id)
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::NotFound { .. }));
    println!("✅ Worker lifecycle complete");
}

#[tokio::test]
async fn test_add_worker_respects_limit() {
    print_test_header("test_add_worker_respects_limit", "Workers beyond the limit conflict");

    let mut config = test_config();
    config.max_workers_per_society = 1;
    let env = TestEnv::with_config(config);
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;

    env.service
        .add_worker(&admin, society.id, new_worker("Raju", WorkerCategory::Plumber))
        .await
        .unwrap();
    let err = env
        .service
        .add_worker(&admin, society.id, new_worker("Meena", WorkerCategory::Cleaner))
        .await
        .unwrap_err();
    assert!(matches!(err, SocietyError::Conflict { .. }));
    println!("✅ Worker limit enforced on add");
}

#[tokio::test]
async fn test_society_overview_counts() {
    print_test_header(
        "test_society_overview_counts",
        "Dashboard counters reflect tenants, units, requests and payments",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;
    env.tenant_in(society.id, "priya@example.com").await;

    let property = env
        .service
        .create_property(
            &admin,
            Some(society.id),
            NewProperty {
                unit_number: "A-101".to_string(),
                block: Some("A".to_string()),
                floor: Some(1),
                monthly_rent_cents: 2_500_000,
            },
        )
        .await
        .unwrap();
    env.service
        .create_property(
            &admin,
            Some(society.id),
            NewProperty {
                unit_number: "A-102".to_string(),
                block: None,
                floor: None,
                monthly_rent_cents: 2_500_000,
            },
        )
        .await
        .unwrap();
    env.service
        .assign_tenant(&admin, property.id, Some(tenant.profile_id))
        .await
        .unwrap();

    let open = env
        .service
        .create_maintenance_request(&tenant, new_request("Leaking tap"))
        .await
        .unwrap();
    let done = env
        .service
        .create_maintenance_request(&tenant, new_request("Broken switch"))
        .await
        .unwrap();
    env.service
        .update_maintenance_request(
            &admin,
            done.id,
            MaintenanceRequestPatch {
                status: Some(RequestStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let due = chrono::Utc::now() + chrono::Duration::days(10);
    let rent = env
        .service
        .create_payment(
            &admin,
            Some(society.id),
            NewPayment {
                tenant_id: tenant.profile_id,
                property_id: Some(property.id),
                amount_cents: 2_500_000,
                description: "March rent".to_string(),
                due_date: due,
            },
        )
        .await
        .unwrap();
    env.service
        .create_payment(
            &admin,
            Some(society.id),
            NewPayment {
                tenant_id: tenant.profile_id,
                property_id: None,
                amount_cents: 300_000,
                description: "Maintenance fee".to_string(),
                due_date: due,
            },
        )
        .await
        .unwrap();
    env.service.pay(&tenant, rent.id).await.unwrap();

    let overview = env.service.society_overview(&admin, society.id).await.unwrap();
    assert_eq!(overview.society_id, society.id);
    assert_eq!(overview.tenants, 2);
    assert_eq!(overview.properties, 2);
    assert_eq!(overview.occupied_properties, 1);
    assert_eq!(overview.open_requests, 1);
    assert_eq!(overview.resolved_requests, 1);
    assert_eq!(overview.collected_payments_cents, 2_500_000);
    assert_eq!(overview.pending_payments_cents, 300_000);
    assert_ne!(open.id, done.id);
    println!("✅ Overview counters correct");
}

#[tokio::test]
async fn test_overview_payment_totals_do_not_overflow() {
    print_test_header(
        "test_overview_payment_totals_do_not_overflow",
        "Oversized amounts are refused and stored totals never wrap",
    );

    let env = TestEnv::new();
    let admin = env.admin("admin@greenmeadows.in").await;
    let society = env.society(&admin).await;
    let tenant = env.tenant_in(society.id, "ravi@example.com").await;

    let bill = |amount_cents| NewPayment {
        tenant_id: tenant.profile_id,
        property_id: None,
        amount_cents,
        description: "Corpus fund".to_string(),
        due_date: chrono::Utc::now() + chrono::Duration::days(10),
    };

    assert!(matches!(
        env.service
            .create_payment(&admin, Some(society.id), bill(i64::MAX / 2 + 1))
            .await,
        Err(SocietyError::Validation { .. })
    ));

    // Rows written outside the service can still hold any amount
    for _ in 0..2 {
        let mut payment = env
            .service
            .create_payment(&admin, Some(society.id), bill(100))
            .await
            .unwrap();
        payment.amount_cents = i64::MAX / 2 + 1;
        env.store.put_payment(payment);
    }

    assert_eq!(
        env.service
            .society_overview(&admin, society.id)
            .await
            .unwrap_err(),
        SocietyError::Internal
    );
    println!("✅ Payment totals guarded");
}
