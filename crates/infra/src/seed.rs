//! Demo dataset for local development.
//!
//! Populates the stores with a small catalog, a few customers, and a small
//! team so the dashboard and reports have something to show on first run.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use visio_core::{DomainResult, Money};
use visio_hr::{Employee, EmployeeDetails, EmployeeId, EmployeeStatus};
use visio_parties::{ContactInfo, Customer, CustomerId};
use visio_products::{Product, ProductDetails, ProductId};

use crate::store::KeyStore;

pub fn seed_demo_data(
    products: &impl KeyStore<ProductId, Product>,
    customers: &impl KeyStore<CustomerId, Customer>,
    employees: &impl KeyStore<EmployeeId, Employee>,
) -> DomainResult<()> {
    let now = Utc::now();

    let catalog: [(&str, &str, &str, i64, i64, i64, i64); 5] = [
        ("LP-001", "Laptop Pro 15", "Electronics", 1_299_99, 900_00, 25, 5),
        ("WM-002", "Wireless Mouse", "Accessories", 29_99, 12_00, 150, 20),
        ("UC-003", "USB-C Hub", "Accessories", 49_99, 22_00, 80, 15),
        ("MN-004", "Monitor 27\"", "Electronics", 349_99, 210_00, 40, 8),
        ("KB-005", "Mechanical Keyboard", "Accessories", 89_99, 45_00, 60, 10),
    ];
    for (sku, name, category, price_cents, cost_cents, stock, min) in catalog {
        let id = ProductId::new();
        let product = Product::new(
            id,
            ProductDetails {
                sku: sku.to_string(),
                name: name.to_string(),
                category: Some(category.to_string()),
                price: Money::new(Decimal::new(price_cents, 2))?,
                cost: Money::new(Decimal::new(cost_cents, 2))?,
                stock_quantity: stock,
                min_stock_level: min,
            },
            now,
        )?;
        products.upsert(id, product);
    }

    let accounts: [(&str, &str, Option<&str>); 3] = [
        ("Acme Corporation", "contact@acme.com", Some("555-0101")),
        ("TechStart Inc", "hello@techstart.io", Some("555-0102")),
        ("Global Traders", "info@globaltraders.com", None),
    ];
    for (name, email, phone) in accounts {
        let id = CustomerId::new();
        let customer = Customer::new(
            id,
            name.to_string(),
            email.to_string(),
            ContactInfo {
                phone: phone.map(str::to_string),
                address: None,
            },
            now,
        )?;
        customers.upsert(id, customer);
    }

    let team: [(&str, &str, &str, &str, i64); 3] = [
        ("John Smith", "john@company.com", "Sales", "Sales Manager", 75_000),
        ("Sarah Johnson", "sarah@company.com", "Engineering", "Developer", 85_000),
        ("Mike Williams", "mike@company.com", "Operations", "Warehouse Lead", 55_000),
    ];
    for (name, email, department, position, salary) in team {
        let id = EmployeeId::new();
        let employee = Employee::new(
            id,
            EmployeeDetails {
                name: name.to_string(),
                email: email.to_string(),
                department: Some(department.to_string()),
                position: Some(position.to_string()),
                salary: Money::new(Decimal::from(salary))?,
                hire_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                status: EmployeeStatus::Active,
            },
            now,
        )?;
        employees.upsert(id, employee);
    }

    tracing::info!("demo data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn seeds_catalog_customers_and_team() {
        let products = InMemoryStore::new();
        let customers = InMemoryStore::new();
        let employees = InMemoryStore::new();

        seed_demo_data(&products, &customers, &employees).unwrap();

        assert_eq!(products.list().len(), 5);
        assert_eq!(customers.list().len(), 3);
        assert_eq!(employees.list().len(), 3);
        assert!(products.list().iter().all(|p| p.stock_quantity() > 0));
    }
}
