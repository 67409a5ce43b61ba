//! End-to-end checkout tests against the in-memory backend, including
//! injected failures at each step of the submission sequence.

use async_trait::async_trait;
use luxe_commerce::catalog::{Product, VariantAxis, VariantSelection};
use luxe_commerce::ids::ProductId;
use luxe_commerce::money::{Currency, Money};
use luxe_commerce::order::{Order, OrderItem, OrderStatus, Payment};
use luxe_data::prelude::*;
use luxe_storefront::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Wraps the memory backend and fails configured operations, to exercise
/// the surface-and-retry error handling of the checkout flow.
struct FailingClient {
    inner: Arc<MemoryBackend>,
    fail_insert_into: Mutex<Option<String>>,
    fail_update_of: Mutex<Option<String>>,
}

impl FailingClient {
    fn new(inner: Arc<MemoryBackend>) -> Self {
        Self {
            inner,
            fail_insert_into: Mutex::new(None),
            fail_update_of: Mutex::new(None),
        }
    }

    fn fail_insert_into(&self, collection: Option<&str>) {
        *self.fail_insert_into.lock().unwrap() = collection.map(String::from);
    }

    fn fail_update_of(&self, collection: Option<&str>) {
        *self.fail_update_of.lock().unwrap() = collection.map(String::from);
    }

    fn check_insert(&self, collection: &str) -> Result<(), DataError> {
        match self.fail_insert_into.lock().unwrap().as_deref() {
            Some(failing) if failing == collection => {
                Err(DataError::Backend(format!("injected {} failure", collection)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DataClient for FailingClient {
    async fn insert(&self, collection: &str, record: Value) -> Result<Value, DataError> {
        self.check_insert(collection)?;
        self.inner.insert(collection, record).await
    }

    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> Result<(), DataError> {
        self.check_insert(collection)?;
        self.inner.insert_many(collection, records).await
    }

    async fn select(&self, collection: &str, query: Select) -> Result<Vec<Value>, DataError> {
        self.inner.select(collection, query).await
    }

    async fn update(
        &self,
        collection: &str,
        query: Select,
        patch: Value,
    ) -> Result<u64, DataError> {
        if self.fail_update_of.lock().unwrap().as_deref() == Some(collection) {
            return Err(DataError::Backend(format!("injected {} failure", collection)));
        }
        self.inner.update(collection, query, patch).await
    }

    async fn delete(&self, collection: &str, query: Select) -> Result<u64, DataError> {
        self.inner.delete(collection, query).await
    }

    async fn upsert(
        &self,
        collection: &str,
        record: Value,
        conflict_fields: &[&str],
    ) -> Result<Value, DataError> {
        self.check_insert(collection)?;
        self.inner.upsert(collection, record, conflict_fields).await
    }
}

struct Harness {
    backend: Arc<MemoryBackend>,
    client: Arc<FailingClient>,
    orders: OrderRepo,
    receipts: ReceiptStore,
    config: StoreConfig,
}

fn harness() -> Harness {
    let backend = Arc::new(MemoryBackend::new());
    let client = Arc::new(FailingClient::new(backend.clone()));
    let config = StoreConfig::default();
    Harness {
        orders: OrderRepo::new(client.clone()),
        receipts: ReceiptStore::new(backend.clone(), &config),
        backend,
        client,
        config,
    }
}

fn coat() -> Product {
    let mut product = Product::new("Wool Coat", Money::new(5000, Currency::USD));
    product.id = ProductId::new("prod-coat");
    product.add_axis(VariantAxis::new("Size", ["S", "M", "L"]));
    product
}

fn filled_cart() -> CartStore {
    let mut cart = CartStore::new();
    cart.add(&coat(), VariantSelection::new().with("Size", "M"), 2)
        .unwrap();
    cart
}

async fn orders_in(backend: &MemoryBackend) -> Vec<Order> {
    backend
        .select_as("orders", Select::new())
        .await
        .unwrap()
}

async fn payments_in(backend: &MemoryBackend) -> Vec<Payment> {
    backend
        .select_as("payments", Select::new())
        .await
        .unwrap()
}

#[tokio::test]
async fn happy_path_places_order_and_submits_receipt() {
    let h = harness();
    let user = luxe_commerce::ids::UserId::new("u1");
    let mut cart = filled_cart();
    let mut flow = CheckoutFlow::new();

    // Step 1: place the order. Subtotal 100.00 -> 15.00 shipping + 8.00
    // tax = 123.00 grand total.
    let order_id = flow
        .place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap();

    let orders = orders_in(&h.backend).await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::PendingPayment);
    assert_eq!(orders[0].total_amount.amount_cents, 12300);

    let items: Vec<OrderItem> = h
        .backend
        .select_as("order_items", Select::new())
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].price_at_purchase.amount_cents, 5000);

    // The cart survives order placement; only a successful receipt
    // submission clears it.
    assert!(!cart.is_empty());
    let instructions = flow.payment_instructions(&h.config).unwrap();
    assert!(instructions.contains("LUXE Commerce Bank"));

    // Steps 2-3: submit the receipt.
    flow.submit_receipt(
        &h.orders,
        &h.receipts,
        &user,
        &mut cart,
        "First National",
        "receipt.png",
        vec![0xFF, 0xD8],
    )
    .await
    .unwrap();

    let payments = payments_in(&h.backend).await;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount.amount_cents, 12300);
    let receipt_path = payments[0].receipt_path.clone().unwrap();
    assert!(receipt_path.starts_with(&format!("{}/{}/", user, order_id)));
    assert!(h.backend.file("payment-receipts", &receipt_path).await.is_some());

    let orders = orders_in(&h.backend).await;
    assert_eq!(orders[0].status, OrderStatus::PaymentSubmitted);
    assert!(cart.is_empty());
    assert_eq!(flow.stage(), &CheckoutStage::Submitted { order_id });
}

#[tokio::test]
async fn order_insert_failure_leaves_cart_and_no_records() {
    let h = harness();
    let user = luxe_commerce::ids::UserId::new("u1");
    let cart = filled_cart();
    let mut flow = CheckoutFlow::new();

    h.client.fail_insert_into(Some("orders"));
    let err = flow
        .place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::External);

    assert!(!cart.is_empty());
    assert!(orders_in(&h.backend).await.is_empty());
    assert!(payments_in(&h.backend).await.is_empty());
    assert_eq!(flow.stage(), &CheckoutStage::Cart);
}

#[tokio::test]
async fn item_insert_failure_surfaces_without_reconciling() {
    let h = harness();
    let user = luxe_commerce::ids::UserId::new("u1");
    let cart = filled_cart();
    let mut flow = CheckoutFlow::new();

    h.client.fail_insert_into(Some("order_items"));
    let err = flow
        .place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::External);

    // The partial order record is left behind; this core does not
    // reconcile it. The cart and flow stay put so the user can retry.
    assert_eq!(orders_in(&h.backend).await.len(), 1);
    assert!(!cart.is_empty());
    assert_eq!(flow.stage(), &CheckoutStage::Cart);
}

#[tokio::test]
async fn receipt_failure_keeps_order_pending_and_cart_intact_then_retry_succeeds() {
    let h = harness();
    let user = luxe_commerce::ids::UserId::new("u1");
    let mut cart = filled_cart();
    let mut flow = CheckoutFlow::new();

    flow.place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap();

    // First attempt: the payment insert fails after the upload.
    h.client.fail_insert_into(Some("payments"));
    let err = flow
        .submit_receipt(
            &h.orders,
            &h.receipts,
            &user,
            &mut cart,
            "First National",
            "receipt.jpg",
            vec![1],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::External);

    assert_eq!(orders_in(&h.backend).await[0].status, OrderStatus::PendingPayment);
    assert!(payments_in(&h.backend).await.is_empty());
    assert!(!cart.is_empty());
    assert!(matches!(flow.stage(), CheckoutStage::Payment { .. }));

    // Retry with a new file succeeds without re-placing the order.
    h.client.fail_insert_into(None);
    flow.submit_receipt(
        &h.orders,
        &h.receipts,
        &user,
        &mut cart,
        "First National",
        "receipt2.jpg",
        vec![2],
    )
    .await
    .unwrap();

    let orders = orders_in(&h.backend).await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::PaymentSubmitted);
    assert_eq!(payments_in(&h.backend).await.len(), 1);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn status_update_failure_is_retryable_too() {
    let h = harness();
    let user = luxe_commerce::ids::UserId::new("u1");
    let mut cart = filled_cart();
    let mut flow = CheckoutFlow::new();

    flow.place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap();

    h.client.fail_update_of(Some("orders"));
    assert!(flow
        .submit_receipt(
            &h.orders,
            &h.receipts,
            &user,
            &mut cart,
            "First National",
            "receipt.jpg",
            vec![1],
        )
        .await
        .is_err());
    assert!(!cart.is_empty());
    assert!(matches!(flow.stage(), CheckoutStage::Payment { .. }));

    h.client.fail_update_of(None);
    flow.submit_receipt(
        &h.orders,
        &h.receipts,
        &user,
        &mut cart,
        "First National",
        "receipt2.jpg",
        vec![2],
    )
    .await
    .unwrap();
    assert_eq!(orders_in(&h.backend).await[0].status, OrderStatus::PaymentSubmitted);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn price_is_captured_at_purchase_time() {
    let h = harness();
    let user = luxe_commerce::ids::UserId::new("u1");
    let products = ProductRepo::new(h.client.clone());
    let mut product = coat();

    products.create(&product).await.unwrap();

    let mut cart = CartStore::new();
    cart.add(&product, VariantSelection::new().with("Size", "M"), 1)
        .unwrap();

    let mut flow = CheckoutFlow::new();
    flow.place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap();

    // A later catalog price change must not touch the placed order.
    product.price = Money::new(9900, Currency::USD);
    products.update(&product).await.unwrap();

    let items: Vec<OrderItem> = h
        .backend
        .select_as("order_items", Select::new())
        .await
        .unwrap();
    assert_eq!(items[0].price_at_purchase.amount_cents, 5000);
}

#[tokio::test]
async fn signed_in_user_flows_into_checkout() {
    let h = harness();
    h.backend
        .sign_in(SessionUser::new("u42").with_email("buyer@example.com"))
        .await;

    let user = luxe_storefront::require_user(h.backend.as_ref()).await.unwrap();
    let cart = filled_cart();
    let mut flow = CheckoutFlow::new();
    flow.place_order(&h.orders, &h.config.pricing, &user, &cart)
        .await
        .unwrap();

    assert_eq!(orders_in(&h.backend).await[0].user_id.as_str(), "u42");
}
