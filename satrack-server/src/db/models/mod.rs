//! Database Models

// Serde helpers
pub mod serde_helpers;

// Ledger entities
pub mod customer;
pub mod expense;
pub mod supplier;
pub mod transaction;

// Orders
pub mod order;

// Auth / Personnel
pub mod user;

// Re-exports
pub use customer::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
pub use expense::{Expense, ExpenseCreate, ExpenseId, ExpenseUpdate};
pub use order::{
    CustomerBrief, GlassColor, Order, OrderCreate, OrderId, OrderStatus, OrderStatusUpdate,
    OrderUpdate, OrderWithCustomer,
};
pub use supplier::{Supplier, SupplierCreate, SupplierId, SupplierUpdate};
pub use transaction::{BalanceEntryKind, ExpenseEntryKind, Transaction, TransactionCreate};
pub use user::{
    SalaryType, User, UserCreate, UserFinancials, UserId, UserResponse, UserRole, UserUpdate,
};
