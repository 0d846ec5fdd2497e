use crate::{impls::psp22::PSP22Event, AccountId, Balance, Timestamp};
use scale::Encode;
use sha2::{Digest, Sha256};

/// Events emitted by the contracts of the simulated chain.
///
/// Each variant carries the address of the emitting contract first.
#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode, scale_info::TypeInfo)]
pub enum Event {
    Transfer {
        token: AccountId,
        from: Option<AccountId>,
        to: Option<AccountId>,
        value: Balance,
    },
    Approval {
        token: AccountId,
        owner: AccountId,
        spender: AccountId,
        amount: Balance,
    },
    PairCreated {
        factory: AccountId,
        token_0: AccountId,
        token_1: AccountId,
        pair: AccountId,
        pair_len: u64,
    },
    Mint {
        pair: AccountId,
        sender: AccountId,
        amount_0: Balance,
        amount_1: Balance,
    },
    Burn {
        pair: AccountId,
        sender: AccountId,
        amount_0: Balance,
        amount_1: Balance,
        to: AccountId,
    },
    Swap {
        pair: AccountId,
        sender: AccountId,
        amount_0_in: Balance,
        amount_1_in: Balance,
        amount_0_out: Balance,
        amount_1_out: Balance,
        to: AccountId,
    },
    Sync {
        pair: AccountId,
        reserve_0: Balance,
        reserve_1: Balance,
    },
}

impl Event {
    fn from_psp22(token: AccountId, event: PSP22Event) -> Self {
        match event {
            PSP22Event::Transfer { from, to, value } => Event::Transfer {
                token,
                from,
                to,
                value,
            },
            PSP22Event::Approval {
                owner,
                spender,
                amount,
            } => Event::Approval {
                token,
                owner,
                spender,
                amount,
            },
        }
    }
}

/// Execution environment shared by every contract: the block clock, the
/// account on whose behalf the current call runs and the event log.
#[derive(Debug)]
pub struct Env {
    block_timestamp: Timestamp,
    caller: AccountId,
    nonce: u64,
    events: Vec<Event>,
}

impl Env {
    pub fn new(caller: AccountId, block_timestamp: Timestamp) -> Self {
        Self {
            block_timestamp,
            caller,
            nonce: 0,
            events: Vec::new(),
        }
    }

    pub fn block_timestamp(&self) -> Timestamp {
        self.block_timestamp
    }

    pub fn set_block_timestamp(&mut self, block_timestamp: Timestamp) {
        log::debug!(
            "block timestamp {} -> {}",
            self.block_timestamp,
            block_timestamp
        );
        self.block_timestamp = block_timestamp;
    }

    pub fn advance_block_timestamp(&mut self, millis: Timestamp) {
        self.set_block_timestamp(self.block_timestamp.saturating_add(millis));
    }

    pub fn caller(&self) -> AccountId {
        self.caller
    }

    pub fn set_caller(&mut self, caller: AccountId) {
        self.caller = caller;
    }

    /// Runs `f` as a call made by `caller`, restoring the previous caller afterwards.
    ///
    /// This is how one contract calls another: the callee sees the calling
    /// contract's address as its caller.
    pub fn with_caller<R>(&mut self, caller: AccountId, f: impl FnOnce(&mut Env) -> R) -> R {
        let previous = core::mem::replace(&mut self.caller, caller);
        let result = f(self);
        self.caller = previous;
        result
    }

    /// Derives the address of a contract instantiated by `deployer` with `salt`.
    pub fn derive_account_id(deployer: AccountId, salt: &[u8]) -> AccountId {
        let mut hasher = Sha256::new();
        hasher.update(deployer.encode());
        hasher.update(salt);
        let mut account = [0u8; 32];
        account.copy_from_slice(&hasher.finalize());
        AccountId::from(account)
    }

    /// Address for a fresh contract deployed by `deployer`; never repeats.
    pub fn next_account_id(&mut self, deployer: AccountId) -> AccountId {
        self.nonce += 1;
        Self::derive_account_id(deployer, &self.nonce.encode())
    }

    pub fn emit_event(&mut self, event: Event) {
        log::trace!("event: {:?}", event);
        self.events.push(event);
    }

    pub fn emit_psp22_events(&mut self, token: AccountId, events: Vec<PSP22Event>) {
        for event in events {
            self.emit_event(Event::from_psp22(token, event));
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }
}
