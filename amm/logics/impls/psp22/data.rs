use std::collections::BTreeMap;

use crate::{traits::PSP22Error, AccountId, Balance};
use amm_helpers::{constants::ZERO_ADDRESS, ensure};

/// Events produced by `PSP22Data`; the owning contract stamps them with its
/// address and pushes them to the `Env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PSP22Event {
    Transfer {
        from: Option<AccountId>,
        to: Option<AccountId>,
        value: Balance,
    },
    Approval {
        owner: AccountId,
        spender: AccountId,
        amount: Balance,
    },
}

/// Balance and allowance bookkeeping of a PSP22 token.
///
/// The sum of all balances equals `total_supply` after every operation.
#[derive(Debug, Default, Clone)]
pub struct PSP22Data {
    total_supply: Balance,
    balances: BTreeMap<AccountId, Balance>,
    allowances: BTreeMap<(AccountId, AccountId), Balance>,
}

impl PSP22Data {
    /// Creates a token with `supply` balance initially held by the `creator` account.
    pub fn new(supply: Balance, creator: AccountId) -> (PSP22Data, Vec<PSP22Event>) {
        let mut data = PSP22Data::default();
        if supply == 0 {
            return (data, vec![]);
        }
        data.total_supply = supply;
        data.balances.insert(creator, supply);
        let event = PSP22Event::Transfer {
            from: None,
            to: Some(creator),
            value: supply,
        };
        (data, vec![event])
    }

    pub fn total_supply(&self) -> Balance {
        self.total_supply
    }

    pub fn balance_of(&self, owner: AccountId) -> Balance {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn check_transfer(
        &self,
        caller: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        if caller == to || value == 0 {
            return Ok(());
        }
        ensure!(
            to != AccountId::from(ZERO_ADDRESS),
            PSP22Error::ZeroRecipientAddress
        );
        ensure!(
            self.balance_of(caller) >= value,
            PSP22Error::InsufficientBalance
        );
        Ok(())
    }

    /// Runs every check of `transfer_from` without changing any state.
    pub fn check_transfer_from(
        &self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        if from == to || value == 0 {
            return Ok(());
        }
        ensure!(
            self.allowance(from, caller) >= value,
            PSP22Error::InsufficientAllowance
        );
        self.check_transfer(from, to, value)
    }

    /// Moves `value` tokens from `caller` to `to`.
    pub fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<Vec<PSP22Event>, PSP22Error> {
        self.check_transfer(caller, to, value)?;
        if caller == to || value == 0 {
            return Ok(vec![]);
        }
        self.sub_balance(caller, value);
        self.add_balance(to, value);
        Ok(vec![PSP22Event::Transfer {
            from: Some(caller),
            to: Some(to),
            value,
        }])
    }

    /// Moves `value` tokens from `from` to `to` spending `caller`'s allowance.
    /// The owner spends an allowance too; it is never implicit.
    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<Vec<PSP22Event>, PSP22Error> {
        self.check_transfer_from(caller, from, to, value)?;
        if from == to || value == 0 {
            return Ok(vec![]);
        }
        let allowance = self.allowance(from, caller) - value;
        self.set_allowance(from, caller, allowance);
        self.sub_balance(from, value);
        self.add_balance(to, value);
        Ok(vec![
            PSP22Event::Approval {
                owner: from,
                spender: caller,
                amount: allowance,
            },
            PSP22Event::Transfer {
                from: Some(from),
                to: Some(to),
                value,
            },
        ])
    }

    /// Sets a new `value` for allowance granted by `owner` to `spender`.
    /// Overwrites the previous value.
    pub fn approve(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        value: Balance,
    ) -> Result<Vec<PSP22Event>, PSP22Error> {
        if owner == spender {
            return Ok(vec![]);
        }
        self.set_allowance(owner, spender, value);
        Ok(vec![PSP22Event::Approval {
            owner,
            spender,
            amount: value,
        }])
    }

    pub fn increase_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<Vec<PSP22Event>, PSP22Error> {
        if owner == spender || delta_value == 0 {
            return Ok(vec![]);
        }
        let amount = self.allowance(owner, spender).saturating_add(delta_value);
        self.approve(owner, spender, amount)
    }

    pub fn decrease_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<Vec<PSP22Event>, PSP22Error> {
        if owner == spender || delta_value == 0 {
            return Ok(vec![]);
        }
        let amount = self
            .allowance(owner, spender)
            .checked_sub(delta_value)
            .ok_or(PSP22Error::InsufficientAllowance)?;
        self.approve(owner, spender, amount)
    }

    /// Mints a `value` of new tokens to `to` account.
    pub fn mint(&mut self, to: AccountId, value: Balance) -> Result<Vec<PSP22Event>, PSP22Error> {
        if value == 0 {
            return Ok(vec![]);
        }
        ensure!(
            to != AccountId::from(ZERO_ADDRESS),
            PSP22Error::ZeroRecipientAddress
        );
        self.total_supply = self
            .total_supply
            .checked_add(value)
            .ok_or_else(|| {
                PSP22Error::Custom(String::from(
                    "Max PSP22 supply exceeded. Max supply limited to 2^128-1.",
                ))
            })?;
        self.add_balance(to, value);
        Ok(vec![PSP22Event::Transfer {
            from: None,
            to: Some(to),
            value,
        }])
    }

    /// Burns `value` tokens from `from` account.
    pub fn burn(&mut self, from: AccountId, value: Balance) -> Result<Vec<PSP22Event>, PSP22Error> {
        if value == 0 {
            return Ok(vec![]);
        }
        ensure!(
            self.balance_of(from) >= value,
            PSP22Error::InsufficientBalance
        );
        self.sub_balance(from, value);
        self.total_supply -= value;
        Ok(vec![PSP22Event::Transfer {
            from: Some(from),
            to: None,
            value,
        }])
    }

    // Callers check the balance first.
    fn sub_balance(&mut self, owner: AccountId, value: Balance) {
        let balance = self.balance_of(owner) - value;
        if balance == 0 {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, balance);
        }
    }

    // Total supply is limited by u128::MAX so no overflow is possible.
    fn add_balance(&mut self, owner: AccountId, value: Balance) {
        let balance = self.balance_of(owner).saturating_add(value);
        self.balances.insert(owner, balance);
    }

    fn set_allowance(&mut self, owner: AccountId, spender: AccountId, value: Balance) {
        if value == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), value);
        }
    }
}
