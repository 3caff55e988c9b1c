use super::*;
use crate::db::models::{User, UserFinancials, UserRole};
use chrono::Utc;

fn user_with(financials: UserFinancials) -> User {
    User {
        id: None,
        username: "worker".to_string(),
        email: "worker@example.com".to_string(),
        hash_pass: String::new(),
        role: UserRole::Personel,
        financials,
        reset_password_token: None,
        reset_password_expires: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_empty_staff() {
    let stats = aggregate(&[]);
    assert_eq!(stats.total_users, 0);
    assert_eq!(stats.total_monthly_cost, 0.0);
    assert_eq!(stats.total_weekly_cost, 0.0);
}

#[test]
fn test_monthly_and_weekly_salaries() {
    // 1000/monthly + 1000/weekly:
    //   monthly total = 1000 + 1000*4 = 5000
    //   weekly total  = 1000/4 + 1000 = 1250
    let users = vec![
        user_with(UserFinancials {
            salary: 1000.0,
            salary_type: SalaryType::Monthly,
            ..Default::default()
        }),
        user_with(UserFinancials {
            salary: 1000.0,
            salary_type: SalaryType::Weekly,
            ..Default::default()
        }),
    ];

    let stats = aggregate(&users);
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_monthly_cost, 5000.0);
    assert_eq!(stats.total_weekly_cost, 1250.0);
}

#[test]
fn test_monthly_staff_extras_scale_with_salary() {
    // Monthly-paid: everything divides by four for the weekly figure
    let users = vec![user_with(UserFinancials {
        salary: 2000.0,
        salary_type: SalaryType::Monthly,
        insurance: 100.0,
        benefits: 60.0,
        transport: 30.0,
        overtime: 10.0,
    })];

    let stats = aggregate(&users);
    assert_eq!(stats.total_monthly_cost, 2200.0);
    assert_eq!(stats.total_weekly_cost, 550.0);
}

#[test]
fn test_weekly_staff_extras_are_not_multiplied() {
    // Weekly-paid: only the salary scales up to a monthly figure;
    // extras enter the monthly total unscaled
    let users = vec![user_with(UserFinancials {
        salary: 100.0,
        salary_type: SalaryType::Weekly,
        insurance: 40.0,
        ..Default::default()
    })];

    let stats = aggregate(&users);
    assert_eq!(stats.total_monthly_cost, 440.0); // 100*4 + 40
    assert_eq!(stats.total_weekly_cost, 110.0); // 100 + 40/4
}

#[test]
fn test_fractional_weekly_figures_round_to_cents() {
    let users = vec![user_with(UserFinancials {
        salary: 1001.0,
        salary_type: SalaryType::Monthly,
        ..Default::default()
    })];

    let stats = aggregate(&users);
    assert_eq!(stats.total_monthly_cost, 1001.0);
    assert_eq!(stats.total_weekly_cost, 250.25);
}
