//! AccountStore - the set of accounts one transaction runs against

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use moneyflow_core::{Account, Currency};

/// Accounts keyed by id. Ordered so balance reports enumerate accounts
/// deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountStore {
    accounts: BTreeMap<String, Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    /// Look up an account, creating a zero-balance, no-overdraft account in
    /// the given currency when the id is unknown.
    pub fn fetch_or_create(&mut self, id: &str, currency: &Currency) -> &mut Account {
        self.accounts
            .entry(id.to_string())
            .or_insert_with(|| Account::empty(id, currency.clone()))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insert_and_get() {
        let mut store = AccountStore::new();
        store.insert(Account::new("merchant", dec!(500), Currency::Usd));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("merchant").unwrap().balance, dec!(500));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_fetch_or_create() {
        let mut store = AccountStore::new();
        let account = store.fetch_or_create("platform", &Currency::Gbp);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.currency, Currency::Gbp);
        assert!(!account.allow_overdraft);

        // an existing account is returned as-is
        store.insert(Account::new("merchant", dec!(100), Currency::Usd));
        let account = store.fetch_or_create("merchant", &Currency::Gbp);
        assert_eq!(account.balance, dec!(100));
        assert_eq!(account.currency, Currency::Usd);
    }

    #[test]
    fn test_accounts_enumerate_in_id_order() {
        let mut store = AccountStore::new();
        store.insert(Account::empty("zeta", Currency::Usd));
        store.insert(Account::empty("alpha", Currency::Usd));

        let ids: Vec<&str> = store.accounts().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }
}
