//! End-to-end variant lifecycle tests against an in-memory database.

use reef_server::db::DbService;
use reef_server::db::models::{
    AttributeCreate, AttributeKind, AttributeReorder, AttributeValueInput, CatalogItemCreate,
    DisplayHint, VariantCreate, VariantMode, VariantUpdate,
};
use reef_server::db::repository::CatalogItemRepository;
use reef_server::generation::{GenerateRequest, VariantManager};
use reef_server::utils::ErrorCode;

async fn setup() -> (VariantManager, CatalogItemRepository) {
    let service = DbService::memory().await.unwrap();
    let manager = VariantManager::new(service.db.clone());
    let items = CatalogItemRepository::new(service.db);
    (manager, items)
}

async fn seed_item(
    items: &CatalogItemRepository,
    mode: VariantMode,
    base_price: Option<f64>,
) -> String {
    let item = items
        .create(CatalogItemCreate {
            name: "Classic Tee".into(),
            description: None,
            brand: None,
            image: None,
            mode,
            base_price,
            price: None,
            stock: None,
        })
        .await
        .unwrap();
    item.id.unwrap().to_string()
}

fn attr(name: &str, values: &[(&str, f64)]) -> AttributeCreate {
    AttributeCreate {
        name: name.into(),
        label: name.into(),
        kind: AttributeKind::Select,
        display: DisplayHint::Button,
        is_required: true,
        is_variation: true,
        description: None,
        values: values
            .iter()
            .map(|(value, adjustment)| AttributeValueInput {
                value: (*value).into(),
                label: (*value).into(),
                description: None,
                color_code: None,
                image: None,
                price_adjustment: *adjustment,
                is_active: true,
            })
            .collect(),
    }
}

async fn seed_color_storage(manager: &VariantManager, item_id: &str) {
    manager
        .add_attribute(item_id, attr("color", &[("red", 0.0), ("blue", 5.0)]))
        .await
        .unwrap();
    manager
        .add_attribute(item_id, attr("storage", &[("64gb", 0.0), ("256gb", 20.0)]))
        .await
        .unwrap();
}

fn generate_request(item_id: &str, prefix: Option<&str>) -> GenerateRequest {
    GenerateRequest {
        item: item_id.to_string(),
        base_price: None,
        sku_prefix: prefix.map(String::from),
    }
}

#[tokio::test]
async fn generates_full_cartesian_set_with_prices_and_skus() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let report = manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.created, 4);
    assert_eq!(report.existing, 0);

    let skus: Vec<&str> = report.variants.iter().map(|v| v.sku.as_str()).collect();
    assert_eq!(
        skus,
        vec![
            "TEE-RED-64GB",
            "TEE-RED-256GB",
            "TEE-BLUE-64GB",
            "TEE-BLUE-256GB",
        ]
    );

    let prices: Vec<f64> = report.variants.iter().map(|v| v.price).collect();
    assert_eq!(prices, vec![100.0, 120.0, 105.0, 125.0]);

    let first = &report.variants[0];
    assert_eq!(first.attributes["color"], "red");
    assert_eq!(first.attributes["storage"], "64gb");
    assert!(first.is_active);
    assert_eq!(first.stock, 0);
}

#[tokio::test]
async fn regeneration_is_idempotent() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();
    let second = manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();

    assert_eq!(second.total, 4);
    assert_eq!(second.existing, 4);
    assert_eq!(second.created, 0);
    assert!(second.variants.is_empty());

    let variants = manager.list_variants(&item_id, true).await.unwrap();
    assert_eq!(variants.len(), 4);
}

#[tokio::test]
async fn generation_fills_gaps_after_value_addition() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();

    // Replace the color value list with a third option added
    let attributes = manager.list_attributes(&item_id).await.unwrap();
    let color_id = attributes[0].attribute.id.as_ref().unwrap().to_string();
    let update = reef_server::db::models::AttributeUpdate {
        name: None,
        label: None,
        kind: None,
        display: None,
        is_required: None,
        is_variation: None,
        description: None,
        values: Some(
            [("red", 0.0), ("blue", 5.0), ("green", 2.5)]
                .iter()
                .map(|(value, adjustment)| AttributeValueInput {
                    value: (*value).into(),
                    label: (*value).into(),
                    description: None,
                    color_code: None,
                    image: None,
                    price_adjustment: *adjustment,
                    is_active: true,
                })
                .collect(),
        ),
    };
    manager.update_attribute(&color_id, update).await.unwrap();

    let report = manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();
    assert_eq!(report.total, 6);
    assert_eq!(report.existing, 4);
    assert_eq!(report.created, 2);

    let created_skus: Vec<&str> = report.variants.iter().map(|v| v.sku.as_str()).collect();
    assert_eq!(created_skus, vec!["TEE-GREEN-64GB", "TEE-GREEN-256GB"]);
}

#[tokio::test]
async fn preview_persists_nothing() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let preview = manager.preview(&item_id, None).await.unwrap();
    assert_eq!(preview.total, 4);
    assert_eq!(preview.combinations[0].index, 1);
    assert_eq!(preview.combinations[3].index, 4);
    assert_eq!(preview.combinations[3].price, 125.0);

    let variants = manager.list_variants(&item_id, true).await.unwrap();
    assert!(variants.is_empty());
}

#[tokio::test]
async fn base_price_override_is_not_persisted() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let report = manager
        .generate(GenerateRequest {
            item: item_id.clone(),
            base_price: Some(200.0),
            sku_prefix: Some("TEE".into()),
        })
        .await
        .unwrap();
    assert_eq!(report.variants[0].price, 200.0);

    let item = items.find_by_id(&item_id).await.unwrap().unwrap();
    assert_eq!(item.base_price, Some(100.0));
}

#[tokio::test]
async fn generate_requires_configurable_item() {
    let (manager, items) = setup().await;
    let simple_id = seed_item(&items, VariantMode::Simple, None).await;

    let err = manager
        .generate(generate_request(&simple_id, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ItemNotConfigurable);

    let err = manager
        .generate(generate_request("item:missing", None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ItemNotFound);
}

#[tokio::test]
async fn generate_without_variation_attributes_is_rejected() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;

    let err = manager
        .generate(generate_request(&item_id, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NoVariationAttributes);
}

#[tokio::test]
async fn empty_value_list_collapses_generation_to_zero() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;
    manager
        .add_attribute(&item_id, attr("material", &[]))
        .await
        .unwrap();

    let preview = manager.preview(&item_id, None).await.unwrap();
    assert_eq!(preview.total, 0);

    let err = manager
        .generate(generate_request(&item_id, None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn non_variation_attributes_are_excluded() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let mut gift_wrap = attr("gift_wrap", &[("yes", 3.0), ("no", 0.0)]);
    gift_wrap.is_variation = false;
    manager.add_attribute(&item_id, gift_wrap).await.unwrap();

    let preview = manager.preview(&item_id, None).await.unwrap();
    assert_eq!(preview.total, 4);
    assert!(!preview.combinations[0].attributes.contains_key("gift_wrap"));
}

#[tokio::test]
async fn duplicate_attribute_name_is_rejected_per_item() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    let other_id = seed_item(&items, VariantMode::Configurable, Some(50.0)).await;

    manager
        .add_attribute(&item_id, attr("color", &[("red", 0.0)]))
        .await
        .unwrap();

    let err = manager
        .add_attribute(&item_id, attr("color", &[("blue", 0.0)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AttributeNameExists);

    // Same name on a different item is fine
    manager
        .add_attribute(&other_id, attr("color", &[("red", 0.0)]))
        .await
        .unwrap();
}

#[tokio::test]
async fn attribute_positions_are_appended_and_reorderable() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let attributes = manager.list_attributes(&item_id).await.unwrap();
    assert_eq!(attributes[0].attribute.name, "color");
    assert_eq!(attributes[0].attribute.position, 0);
    assert_eq!(attributes[1].attribute.name, "storage");
    assert_eq!(attributes[1].attribute.position, 1);

    let ids: Vec<String> = attributes
        .iter()
        .map(|a| a.attribute.id.as_ref().unwrap().to_string())
        .collect();
    manager
        .reorder_attributes(
            &item_id,
            AttributeReorder {
                attribute_ids: vec![ids[1].clone(), ids[0].clone()],
            },
        )
        .await
        .unwrap();

    let reordered = manager.list_attributes(&item_id).await.unwrap();
    assert_eq!(reordered[0].attribute.name, "storage");
    assert_eq!(reordered[0].attribute.position, 0);
    assert_eq!(reordered[1].attribute.name, "color");
    assert_eq!(reordered[1].attribute.position, 1);
}

#[tokio::test]
async fn reorder_rejects_partial_or_foreign_id_lists() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let attributes = manager.list_attributes(&item_id).await.unwrap();
    let first_id = attributes[0].attribute.id.as_ref().unwrap().to_string();

    // Partial list
    let err = manager
        .reorder_attributes(
            &item_id,
            AttributeReorder {
                attribute_ids: vec![first_id.clone()],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    // Unknown id padding the list
    let err = manager
        .reorder_attributes(
            &item_id,
            AttributeReorder {
                attribute_ids: vec![first_id, "attribute:bogus".into()],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn attribute_delete_cascades_to_variants_and_renumbers() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();
    assert_eq!(manager.list_variants(&item_id, true).await.unwrap().len(), 4);

    let attributes = manager.list_attributes(&item_id).await.unwrap();
    let color_id = attributes[0].attribute.id.as_ref().unwrap().to_string();
    manager.delete_attribute(&color_id).await.unwrap();

    // Every variant of the item is gone with the dimension
    assert!(manager.list_variants(&item_id, true).await.unwrap().is_empty());

    let remaining = manager.list_attributes(&item_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].attribute.name, "storage");
    assert_eq!(remaining[0].attribute.position, 0);
}

#[tokio::test]
async fn manual_variant_creation_enforces_sku_uniqueness() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();

    let payload = VariantCreate {
        sku: "TEE-RED-64GB".into(),
        attributes: [("color".to_string(), "red".to_string())].into(),
        price: 99.0,
        stock: 0,
        thumbnail: None,
        gallery: vec![],
        is_active: true,
    };
    let err = manager.create_variant(&item_id, payload).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SkuExists);
}

#[tokio::test]
async fn variant_update_and_delete() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;

    let report = manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();
    let variant_id = report.variants[0].id.as_ref().unwrap().to_string();

    let updated = manager
        .update_variant(
            &variant_id,
            VariantUpdate {
                sku: None,
                attributes: None,
                price: Some(110.0),
                stock: Some(12),
                thumbnail: None,
                gallery: None,
                is_active: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 110.0);
    assert_eq!(updated.stock, 12);
    assert_eq!(updated.sku, "TEE-RED-64GB");

    manager.delete_variant(&variant_id).await.unwrap();
    let err = manager.get_variant(&variant_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::VariantNotFound);

    let err = manager.delete_variant(&variant_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::VariantNotFound);
}

#[tokio::test]
async fn on_disk_database_round_trips_items() {
    let dir = tempfile::tempdir().unwrap();
    let service = DbService::new(dir.path().to_str().unwrap()).await.unwrap();
    let items = CatalogItemRepository::new(service.db);

    let item_id = seed_item(&items, VariantMode::Configurable, Some(42.0)).await;
    let fetched = items.find_by_id(&item_id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Classic Tee");
    assert_eq!(fetched.base_price, Some(42.0));
}

#[tokio::test]
async fn item_delete_cascades_everything() {
    let (manager, items) = setup().await;
    let item_id = seed_item(&items, VariantMode::Configurable, Some(100.0)).await;
    seed_color_storage(&manager, &item_id).await;
    manager
        .generate(generate_request(&item_id, Some("TEE")))
        .await
        .unwrap();

    items.delete_cascading(&item_id).await.unwrap();

    assert!(items.find_by_id(&item_id).await.unwrap().is_none());
    assert!(manager.list_attributes(&item_id).await.unwrap().is_empty());
    assert!(manager.list_variants(&item_id, true).await.unwrap().is_empty());
}
