//! Layered service demonstration
//!
//! This example wires a small controller -> service -> dao stack through one
//! interceptor. Each layer is logged at its configured level, the request id
//! carried by the incoming order follows the call into the dao, and the card
//! number is hidden by a `LogPrint` marker.
//!
//! # Running the example
//!
//! ```bash
//! RUST_LOG=logprint=trace cargo run --example layered_service
//! ```
//!
//! Levels can be changed with `LOGGER_DAO_LEVEL`, `LOGGER_SERVICE_LEVEL`, etc.

use logprint::args::{Argument, Correlated, RemoteOrigin};
use logprint::context::CorrelationContext;
use logprint::interceptor::{CallSite, Interceptor, LogPrint};
use logprint::logging::init_logging;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PlaceOrder {
    #[serde(rename = "reqId")]
    req_id: String,
    sku: String,
    quantity: u32,
}

impl Correlated for PlaceOrder {
    fn request_id(&self) -> Option<&str> {
        Some(&self.req_id)
    }
}

struct Peer(&'static str);

impl RemoteOrigin for Peer {
    fn remote_addr(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("out of stock: {0}")]
struct OutOfStock(String);

struct OrderDao<'i> {
    interceptor: &'i Interceptor,
}

impl OrderDao<'_> {
    async fn insert(&self, sku: &str, quantity: u32) -> Result<u64, OutOfStock> {
        let site = CallSite::method("com.dao.OrderDao", "insert")
            .arg(Argument::value(sku))
            .arg(Argument::value(&quantity));
        self.interceptor
            .intercept_matched_async(&site, || async {
                tokio::time::sleep(Duration::from_millis(15)).await;
                if sku == "sold-out" {
                    Err(OutOfStock(sku.to_string()))
                } else {
                    Ok(1001)
                }
            })
            .await
    }
}

struct PaymentService<'i> {
    interceptor: &'i Interceptor,
}

impl PaymentService<'_> {
    fn charge(&self, card_number: &str, amount_cents: u64) -> Result<String, OutOfStock> {
        let site = CallSite::method("com.acme.billing.PaymentService", "charge")
            .arg(Argument::value(card_number))
            .arg(Argument::value(&amount_cents))
            .annotated(LogPrint::new().except([0]));
        self.interceptor
            .intercept_matched(&site, || Ok(format!("auth-{}", amount_cents)))
    }
}

async fn submit(interceptor: &Interceptor, peer: &Peer, order: &PlaceOrder) -> Result<u64, OutOfStock> {
    let site = CallSite::method("com.acme.web.controller.OrderController", "submit")
        .arg(Argument::inbound(peer))
        .arg(Argument::correlated(order))
        .arg(Argument::outbound());

    interceptor
        .intercept_matched_async(&site, || async {
            PaymentService { interceptor }.charge("4111-1111-1111-1111", 2599)?;
            OrderDao { interceptor }.insert(&order.sku, order.quantity).await
        })
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging("logprint=trace,info")?;

    let interceptor = Interceptor::from_global();
    let peer = Peer("10.0.0.5");

    for sku in ["book-42", "sold-out"] {
        let order = PlaceOrder {
            req_id: uuid::Uuid::new_v4().to_string(),
            sku: sku.to_string(),
            quantity: 2,
        };

        let outcome = CorrelationContext::new()
            .scope(submit(&interceptor, &peer, &order))
            .await;

        match outcome {
            Ok(id) => println!("order {} stored as {}", order.req_id, id),
            Err(e) => println!("order {} rejected: {}", order.req_id, e),
        }
    }

    Ok(())
}
