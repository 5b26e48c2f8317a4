//! Fungible token ledger, native balances and the wrapped native contract

use migrator_core::host::{HostError, HostResult, NativeAsset, TokenLedger};
use migrator_core::{Address, CoreError};

use crate::chain::{SimulatedChain, TokenInfo};
use crate::events::ChainEvent;
use crate::{SimulationError, SimulationResult};

impl SimulatedChain {
    /// Register a new token at a fresh address
    pub fn create_token(&mut self, symbol: &str) -> Address {
        let address = self.allocate_address();
        self.state.tokens.insert(
            address,
            TokenInfo {
                symbol: symbol.to_string(),
            },
        );
        address
    }

    /// Register the wrapped native contract at a fresh address
    pub fn create_wrapped_native(&mut self, symbol: &str) -> SimulationResult<Address> {
        if let Some(existing) = self.state.wrapped_native {
            return Err(SimulationError::InvalidParameter(format!(
                "wrapped native already deployed at {}",
                existing
            )));
        }
        let address = self.create_token(symbol);
        self.state.wrapped_native = Some(address);
        Ok(address)
    }

    pub fn wrapped_native(&self) -> Option<Address> {
        self.state.wrapped_native
    }

    pub fn token_symbol(&self, token: Address) -> Option<&str> {
        self.state.tokens.get(&token).map(|info| info.symbol.as_str())
    }

    /// Credit freshly minted tokens to `to`
    pub fn mint_tokens(&mut self, token: Address, to: Address, amount: u128) -> HostResult<()> {
        self.require_token(token)?;
        self.credit(token, to, amount)?;
        self.emit(ChainEvent::Transfer {
            token,
            from: Address::ZERO,
            to,
            amount,
        });
        Ok(())
    }

    /// Destroy `amount` of `from`'s balance
    pub(crate) fn burn_tokens(&mut self, token: Address, from: Address, amount: u128) -> HostResult<()> {
        self.debit(token, from, amount)?;
        self.emit(ChainEvent::Transfer {
            token,
            from,
            to: Address::ZERO,
            amount,
        });
        Ok(())
    }

    /// Credit native currency out of thin air
    pub fn fund_native(&mut self, holder: Address, amount: u128) -> HostResult<()> {
        let balance = self.state.native.entry(holder).or_default();
        *balance = balance.checked_add(amount).ok_or(CoreError::MathOverflow)?;
        Ok(())
    }

    /// Wrap `amount` of `holder`'s native currency
    pub fn deposit(&mut self, holder: Address, amount: u128) -> HostResult<()> {
        let wrapped = self.require_wrapped_native()?;
        self.transfer_native(holder, wrapped, amount)?;
        self.credit(wrapped, holder, amount)?;
        self.emit(ChainEvent::Deposit { dst: holder, amount });
        Ok(())
    }

    fn require_token(&self, token: Address) -> HostResult<()> {
        if self.state.tokens.contains_key(&token) {
            Ok(())
        } else {
            Err(HostError::UnknownToken(token))
        }
    }

    fn require_wrapped_native(&self) -> HostResult<Address> {
        self.state
            .wrapped_native
            .ok_or(HostError::NotWrappedNative(Address::ZERO))
    }

    fn credit(&mut self, token: Address, holder: Address, amount: u128) -> HostResult<()> {
        let balance = self.state.balances.entry((token, holder)).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(CoreError::MathOverflow)?;
        Ok(())
    }

    fn debit(&mut self, token: Address, holder: Address, amount: u128) -> HostResult<()> {
        let balance = self.state.balances.entry((token, holder)).or_default();
        if *balance < amount {
            return Err(HostError::InsufficientBalance {
                token,
                holder,
                balance: *balance,
                required: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }
}

impl TokenLedger for SimulatedChain {
    fn balance_of(&self, token: Address, holder: Address) -> HostResult<u128> {
        self.require_token(token)?;
        Ok(self.state.balances.get(&(token, holder)).copied().unwrap_or(0))
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> HostResult<u128> {
        self.require_token(token)?;
        Ok(self
            .state
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(0))
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u128,
    ) -> HostResult<()> {
        self.require_token(token)?;
        if amount == 0 {
            self.state.allowances.remove(&(token, owner, spender));
        } else {
            self.state.allowances.insert((token, owner, spender), amount);
        }
        self.emit(ChainEvent::Approval {
            token,
            owner,
            spender,
            amount,
        });
        Ok(())
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> HostResult<()> {
        self.require_token(token)?;
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)?;
        self.emit(ChainEvent::Transfer {
            token,
            from,
            to,
            amount,
        });
        Ok(())
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> HostResult<()> {
        let allowance = self.allowance(token, from, spender)?;
        if allowance < amount {
            return Err(HostError::InsufficientAllowance {
                token,
                owner: from,
                spender,
                allowance,
                required: amount,
            });
        }
        // Maximum allowance is never spent down
        if allowance != u128::MAX {
            let remaining = allowance - amount;
            if remaining == 0 {
                self.state.allowances.remove(&(token, from, spender));
            } else {
                self.state.allowances.insert((token, from, spender), remaining);
            }
        }
        self.transfer(token, from, to, amount)
    }
}

impl NativeAsset for SimulatedChain {
    fn native_balance_of(&self, holder: Address) -> HostResult<u128> {
        Ok(self.state.native.get(&holder).copied().unwrap_or(0))
    }

    fn transfer_native(&mut self, from: Address, to: Address, amount: u128) -> HostResult<()> {
        let balance = self.native_balance_of(from)?;
        if balance < amount {
            return Err(HostError::InsufficientNativeBalance {
                holder: from,
                balance,
                required: amount,
            });
        }
        self.state.native.insert(from, balance - amount);
        self.fund_native(to, amount)
    }

    fn unwrap(&mut self, wrapped: Address, holder: Address, amount: u128) -> HostResult<()> {
        if self.state.wrapped_native != Some(wrapped) {
            return Err(HostError::NotWrappedNative(wrapped));
        }
        self.debit(wrapped, holder, amount)?;
        self.transfer_native(wrapped, holder, amount)?;
        self.emit(ChainEvent::Withdrawal { src: holder, amount });
        Ok(())
    }
}
