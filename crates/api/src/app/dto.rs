//! Request DTOs and JSON mapping helpers.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use visio_accounting::Transaction;
use visio_hr::{Attendance, Employee};
use visio_parties::Customer;
use visio_products::Product;
use visio_sales::Order;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub min_stock_level: i64,
}

/// Raw adjustment delta as submitted. Clients send either a JSON number or a
/// string; fractional values are rejected at the boundary, never coerced.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Delta {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: Delta,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_id: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    #[serde(default)]
    pub salary: Decimal,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub kind: String,
    pub category: Option<String>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub date: Option<NaiveDate>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn customer_to_json(c: &Customer) -> Value {
    json!({
        "id": c.id_typed().to_string(),
        "name": c.name(),
        "email": c.email(),
        "phone": c.contact().phone,
        "address": c.contact().address,
        "created_at": c.created_at(),
    })
}

pub fn product_to_json(p: &Product) -> Value {
    json!({
        "id": p.id_typed().to_string(),
        "sku": p.sku(),
        "name": p.name(),
        "category": p.category(),
        "price": p.price().amount(),
        "cost": p.cost().amount(),
        "stock_quantity": p.stock_quantity(),
        "min_stock_level": p.min_stock_level(),
        "is_low_stock": p.is_low_stock(),
        "created_at": p.created_at(),
    })
}

pub fn order_to_json(o: &Order) -> Value {
    json!({
        "id": o.id_typed().to_string(),
        "order_number": o.order_number().as_str(),
        "customer_id": o.customer_id().to_string(),
        "status": o.status().as_str(),
        "total": o.total().amount(),
        "placed_at": o.placed_at(),
        "lines": o
            .lines()
            .iter()
            .map(|l| json!({
                "line_no": l.line_no,
                "product_id": l.product_id.to_string(),
                "quantity": l.quantity,
                "unit_price": l.unit_price.amount(),
                "subtotal": l.subtotal().amount(),
            }))
            .collect::<Vec<_>>(),
    })
}

pub fn employee_to_json(e: &Employee) -> Value {
    json!({
        "id": e.id_typed().to_string(),
        "employee_number": e.employee_number().as_str(),
        "name": e.name(),
        "email": e.email(),
        "department": e.department(),
        "position": e.position(),
        "salary": e.salary().amount(),
        "hire_date": e.hire_date(),
        "status": if e.is_active() { "active" } else { "inactive" },
        "created_at": e.created_at(),
    })
}

pub fn attendance_to_json(a: &Attendance) -> Value {
    json!({
        "employee_id": a.employee_id().to_string(),
        "date": a.date(),
        "status": a.status(),
        "check_in": a.check_in(),
        "check_out": a.check_out(),
    })
}

pub fn transaction_to_json(t: &Transaction) -> Value {
    json!({
        "id": t.id_typed().to_string(),
        "kind": t.kind(),
        "category": t.category(),
        "amount": t.amount().amount(),
        "description": t.description(),
        "reference": t.reference(),
        "date": t.date(),
        "created_at": t.created_at(),
    })
}
