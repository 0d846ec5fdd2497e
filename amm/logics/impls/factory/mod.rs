use std::collections::BTreeMap;

use crate::{
    env::{Env, Event},
    impls::pair::PairContract,
    traits::{Factory, FactoryError},
    AccountId,
};
use amm_helpers::{
    constants::{DEFAULT_TRADING_FEE, MAX_TRADING_FEE, ZERO_ADDRESS},
    ensure,
};
use scale::Encode;

/// Creates and indexes pairs. Owns every `PairContract` it instantiates.
#[derive(Debug, Clone)]
pub struct FactoryContract {
    account_id: AccountId,
    get_pair: BTreeMap<(AccountId, AccountId), AccountId>,
    all_pairs: Vec<AccountId>,
    pairs: BTreeMap<AccountId, PairContract>,
    fee_to: Option<AccountId>,
    fee_to_setter: AccountId,
    trading_fee: u8,
}

impl FactoryContract {
    /// Deploys a factory on behalf of `env.caller()`.
    pub fn new(
        env: &mut Env,
        fee_to_setter: AccountId,
        trading_fee: u8,
    ) -> Result<Self, FactoryError> {
        ensure!(trading_fee <= MAX_TRADING_FEE, FactoryError::InvalidFee);
        Ok(Self::deploy(env, fee_to_setter, trading_fee))
    }

    /// Factory whose pairs charge `DEFAULT_TRADING_FEE`.
    pub fn with_default_fee(env: &mut Env, fee_to_setter: AccountId) -> Self {
        Self::deploy(env, fee_to_setter, DEFAULT_TRADING_FEE)
    }

    fn deploy(env: &mut Env, fee_to_setter: AccountId, trading_fee: u8) -> Self {
        let account_id = env.next_account_id(env.caller());
        log::debug!(
            "factory {:?} deployed with trading fee {}",
            account_id,
            trading_fee
        );
        Self {
            account_id,
            get_pair: Default::default(),
            all_pairs: Default::default(),
            pairs: Default::default(),
            fee_to: None,
            fee_to_setter,
            trading_fee,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Address `create_pair` gives the pair of two sorted tokens.
    pub fn pair_address(&self, token_0: AccountId, token_1: AccountId) -> AccountId {
        Env::derive_account_id(self.account_id, &(token_0, token_1).encode())
    }

    /// The pair `create_pair` would instantiate for two sorted tokens,
    /// without registering it.
    pub fn instantiate_pair(&self, token_0: AccountId, token_1: AccountId) -> PairContract {
        PairContract::new(
            self.pair_address(token_0, token_1),
            self.account_id,
            token_0,
            token_1,
            self.trading_fee,
        )
    }

    pub fn pair(&self, pair: AccountId) -> Option<&PairContract> {
        self.pairs.get(&pair)
    }

    pub fn pair_mut(&mut self, pair: AccountId) -> Option<&mut PairContract> {
        self.pairs.get_mut(&pair)
    }

    fn sort(
        &self,
        token_0: AccountId,
        token_1: AccountId,
    ) -> Result<(AccountId, AccountId), FactoryError> {
        ensure!(token_0 != token_1, FactoryError::IdenticalAddresses);
        let token_pair = if token_0 < token_1 {
            (token_0, token_1)
        } else {
            (token_1, token_0)
        };
        ensure!(
            token_pair.0 != AccountId::from(ZERO_ADDRESS),
            FactoryError::ZeroAddress
        );
        Ok(token_pair)
    }

    fn only_fee_setter(&self, env: &Env) -> Result<(), FactoryError> {
        ensure!(
            env.caller() == self.fee_to_setter,
            FactoryError::CallerIsNotFeeSetter
        );
        Ok(())
    }
}

impl Factory for FactoryContract {
    fn all_pairs(&self, pid: u64) -> Option<AccountId> {
        usize::try_from(pid)
            .ok()
            .and_then(|pid| self.all_pairs.get(pid))
            .copied()
    }

    fn all_pairs_length(&self) -> u64 {
        self.all_pairs.len() as u64
    }

    fn trading_fee(&self) -> u8 {
        self.trading_fee
    }

    fn create_pair(
        &mut self,
        env: &mut Env,
        token_0: AccountId,
        token_1: AccountId,
    ) -> Result<AccountId, FactoryError> {
        let (token_0, token_1) = self.sort(token_0, token_1)?;
        if let Some(pair) = self.get_pair(token_0, token_1) {
            return Ok(pair);
        }

        let pair_contract = self.instantiate_pair(token_0, token_1);
        let pair = pair_contract.account_id();
        self.pairs.insert(pair, pair_contract);
        self.get_pair.insert((token_0, token_1), pair);
        self.get_pair.insert((token_1, token_0), pair);
        self.all_pairs.push(pair);

        log::info!(
            "pair {:?} created for ({:?}, {:?})",
            pair,
            token_0,
            token_1
        );
        env.emit_event(Event::PairCreated {
            factory: self.account_id,
            token_0,
            token_1,
            pair,
            pair_len: self.all_pairs_length(),
        });

        Ok(pair)
    }

    fn set_fee_to(&mut self, env: &Env, fee_to: AccountId) -> Result<(), FactoryError> {
        self.only_fee_setter(env)?;
        ensure!(
            fee_to != AccountId::from(ZERO_ADDRESS),
            FactoryError::ZeroAddress
        );
        self.fee_to = Some(fee_to);
        Ok(())
    }

    fn set_fee_to_setter(
        &mut self,
        env: &Env,
        fee_to_setter: AccountId,
    ) -> Result<(), FactoryError> {
        self.only_fee_setter(env)?;
        self.fee_to_setter = fee_to_setter;
        Ok(())
    }

    fn fee_to(&self) -> Option<AccountId> {
        self.fee_to
    }

    fn fee_to_setter(&self) -> AccountId {
        self.fee_to_setter
    }

    fn get_pair(&self, token_0: AccountId, token_1: AccountId) -> Option<AccountId> {
        self.get_pair.get(&(token_0, token_1)).copied()
    }
}
