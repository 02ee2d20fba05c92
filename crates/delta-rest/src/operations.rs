//! Operations exposed by [`DeltaRestClient`](crate::DeltaRestClient).

use std::collections::BTreeMap;

/// One callable API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// API tag the operation is listed under.
    pub group: &'static str,
    /// Operation identifier.
    pub name: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Request path, relative to the base URL.
    pub path: &'static str,
    /// Whether the request is signed.
    pub authenticated: bool,
}

pub const GET_WALLET_BALANCES: Operation = Operation {
    group: "Wallet",
    name: "getWalletBalances",
    method: "GET",
    path: "/v2/wallet/balances",
    authenticated: true,
};

pub const GET_PRODUCTS: Operation = Operation {
    group: "Products",
    name: "getProducts",
    method: "GET",
    path: "/v2/products",
    authenticated: false,
};

pub const PLACE_ORDER: Operation = Operation {
    group: "Orders",
    name: "placeOrder",
    method: "POST",
    path: "/v2/orders",
    authenticated: true,
};

pub const PLACE_BATCH_ORDERS: Operation = Operation {
    group: "Orders",
    name: "placeBatchOrders",
    method: "POST",
    path: "/v2/orders/batch",
    authenticated: true,
};

/// Every operation the client implements.
pub const OPERATIONS: &[Operation] = &[
    GET_WALLET_BALANCES,
    GET_PRODUCTS,
    PLACE_ORDER,
    PLACE_BATCH_ORDERS,
];

/// Operation names keyed by group, both sorted.
pub fn operations_by_group() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for op in OPERATIONS {
        groups.entry(op.group).or_default().push(op.name);
    }
    for names in groups.values_mut() {
        names.sort_unstable();
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups() {
        let groups = operations_by_group();
        assert_eq!(
            groups.keys().copied().collect::<Vec<_>>(),
            vec!["Orders", "Products", "Wallet"]
        );
        assert_eq!(groups["Wallet"], vec!["getWalletBalances"]);
        assert_eq!(groups["Orders"], vec!["placeBatchOrders", "placeOrder"]);
    }

    #[test]
    fn test_only_products_is_public() {
        let public: Vec<_> = OPERATIONS.iter().filter(|op| !op.authenticated).collect();
        assert_eq!(public, vec![&GET_PRODUCTS]);
    }
}
