multiversx_sc::imports!();

use crate::{cache::Cache, scaling, storage};
use common_errors::{ERROR_INSUFFICIENT_BALANCE, ERROR_NO_DEBT};

/// Book-keeping over scaled balances.
///
/// All mutations of per-holder state go through this module so that the
/// pool totals stay in sync with the sum of individual positions and every
/// change emits its previous and new nominal value.
#[multiversx_sc::module]
pub trait BalanceEngineModule:
    storage::Storage
    + common_math::SharedMathModule
    + common_events::EventsModule
    + scaling::ScalingModule
{
    /// Scaled supply balance of a holder. An untouched mapper reads as zero
    /// at RAY precision.
    fn scaled_balance_of(&self, holder: &ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.scaled_balance(holder);
        if mapper.is_empty() {
            self.ray_zero()
        } else {
            mapper.get()
        }
    }

    /// Scaled debt of a borrower, zero at RAY when untouched.
    fn scaled_debt_of(
        &self,
        borrower: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.scaled_debt(borrower);
        if mapper.is_empty() {
            self.ray_zero()
        } else {
            mapper.get()
        }
    }

    /// Credits scaled supply units to a holder. Returns the holder's nominal
    /// balance before and after the credit.
    fn mint_scaled(
        &self,
        cache: &mut Cache<Self>,
        holder: &ManagedAddress,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let previous = self.scaled_balance_of(holder);
        let previous_nominal = cache.nominal_supply(&previous);

        let new_balance = previous + scaled.clone();
        let new_nominal = cache.nominal_supply(&new_balance);

        self.scaled_balance(holder).set(&new_balance);
        cache.supplied_scaled += scaled;

        self.balance_change_event(holder, &previous_nominal, &new_nominal, &cache.supplied_scaled);

        (previous_nominal, new_nominal)
    }

    /// Debits scaled supply units from a holder. The balance mapper is
    /// cleared on a full burn so the holder leaves no residue in storage.
    fn burn_scaled(
        &self,
        cache: &mut Cache<Self>,
        holder: &ManagedAddress,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let previous = self.scaled_balance_of(holder);
        require!(*scaled <= previous, ERROR_INSUFFICIENT_BALANCE);

        let previous_nominal = cache.nominal_supply(&previous);

        let new_balance = previous - scaled.clone();
        let new_nominal = cache.nominal_supply(&new_balance);

        if new_balance == self.ray_zero() {
            self.scaled_balance(holder).clear();
        } else {
            self.scaled_balance(holder).set(&new_balance);
        }
        cache.supplied_scaled -= scaled;

        self.balance_change_event(holder, &previous_nominal, &new_nominal, &cache.supplied_scaled);

        (previous_nominal, new_nominal)
    }

    /// Moves scaled supply units between two holders. Pool totals are
    /// unchanged; nominal value moves with the units.
    fn move_scaled(
        &self,
        cache: &mut Cache<Self>,
        from: &ManagedAddress,
        to: &ManagedAddress,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let from_previous = self.scaled_balance_of(from);
        require!(*scaled <= from_previous, ERROR_INSUFFICIENT_BALANCE);

        let from_previous_nominal = cache.nominal_supply(&from_previous);
        let from_new = from_previous - scaled.clone();
        let from_new_nominal = cache.nominal_supply(&from_new);

        if from_new == self.ray_zero() {
            self.scaled_balance(from).clear();
        } else {
            self.scaled_balance(from).set(&from_new);
        }

        let to_previous = self.scaled_balance_of(to);
        let to_previous_nominal = cache.nominal_supply(&to_previous);
        let to_new = to_previous + scaled.clone();
        let to_new_nominal = cache.nominal_supply(&to_new);
        self.scaled_balance(to).set(&to_new);

        self.balance_change_event(from, &from_previous_nominal, &from_new_nominal, &cache.supplied_scaled);
        self.balance_change_event(to, &to_previous_nominal, &to_new_nominal, &cache.supplied_scaled);
    }

    /// Records scaled debt against a borrower.
    fn add_debt(
        &self,
        cache: &mut Cache<Self>,
        borrower: &ManagedAddress,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let previous = self.scaled_debt_of(borrower);
        let previous_debt = cache.nominal_debt(&previous);

        let new_debt_scaled = previous + scaled.clone();
        let new_debt = cache.nominal_debt(&new_debt_scaled);

        self.scaled_debt(borrower).set(&new_debt_scaled);
        cache.borrowed_scaled += scaled;

        self.debt_change_event(borrower, &previous_debt, &new_debt, &cache.borrowed_scaled);
    }

    /// Relieves scaled debt of a borrower, clearing the mapper on full
    /// repayment.
    fn remove_debt(
        &self,
        cache: &mut Cache<Self>,
        borrower: &ManagedAddress,
        scaled: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let previous = self.scaled_debt_of(borrower);
        require!(previous > self.ray_zero(), ERROR_NO_DEBT);
        require!(*scaled <= previous, ERROR_INSUFFICIENT_BALANCE);

        let previous_debt = cache.nominal_debt(&previous);

        let new_debt_scaled = previous - scaled.clone();
        let new_debt = cache.nominal_debt(&new_debt_scaled);

        if new_debt_scaled == self.ray_zero() {
            self.scaled_debt(borrower).clear();
        } else {
            self.scaled_debt(borrower).set(&new_debt_scaled);
        }
        cache.borrowed_scaled -= scaled;

        self.debt_change_event(borrower, &previous_debt, &new_debt, &cache.borrowed_scaled);
    }
}
