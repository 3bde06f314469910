//! API paths, relative to the configured base URL.

use urlencoding::encode;

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
}

pub mod items {
    use super::encode;

    pub const ALL: &str = "/items";
    pub const ACTIVE: &str = "/items/active";
    pub const SEARCH: &str = "/items/search";
    /// The server's route name is misspelled; it has to match exactly.
    pub const SUGGESTIONS: &str = "/Suggesstions";

    #[must_use]
    pub fn by_category(category: &str) -> String {
        format!("/items/category/{}", encode(category))
    }

    #[must_use]
    pub fn by_id(id: &str) -> String {
        format!("/items/{}", encode(id))
    }
}

pub mod customer {
    use super::encode;

    pub const HISTORY_DETAILS: &str = "/CustomerHistory/history-details";

    #[must_use]
    pub fn details(item_id: &str) -> String {
        format!("/CustomerDetails/details/{}", encode(item_id))
    }
}

pub mod requests {
    pub const UPDATE: &str = "/requests/update";
    pub const VACATION: &str = "/requests/vacation";
}

pub mod agent {
    use super::encode;

    pub const CUSTOMERS: &str = "/agent/customers";
    pub const PENDING_PAYMENTS: &str = "/agent/payments/pending";
    pub const PAYMENT_HISTORY: &str = "/agent/payments/history";
    pub const DASHBOARD_STATS: &str = "/agent/dashboard/stats";
    pub const ITEMS: &str = "/agent/items";

    #[must_use]
    pub fn customers_for_item(item_id: &str) -> String {
        format!("/agents/customers/{}", encode(item_id))
    }

    #[must_use]
    pub fn delivery(customer_id: &str) -> String {
        format!("/agent/delivery/{}", encode(customer_id))
    }

    #[must_use]
    pub fn payment_reminder(payment_id: &str) -> String {
        format!("/agent/payment-reminder/{}", encode(payment_id))
    }

    #[must_use]
    pub fn mark_paid(payment_id: &str) -> String {
        format!("/agent/payment/{}/paid", encode(payment_id))
    }

    #[must_use]
    pub fn monthly_report(month: &str) -> String {
        format!("/agent/reports/{}", encode(month))
    }
}

pub mod orders {
    use super::encode;

    pub const MINE: &str = "/orders/my-orders";

    #[must_use]
    pub fn by_id(id: &str) -> String {
        format!("/orders/{}", encode(id))
    }
}
