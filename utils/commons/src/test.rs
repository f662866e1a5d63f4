#[cfg(not(target_arch = "wasm32"))]
pub use inner::*;

#[cfg(not(target_arch = "wasm32"))]
mod inner {
    use concordium_std::test_infrastructure::MockFn;
    use concordium_std::*;

    /// Mock entrypoint that accepts the invocation whenever the parameter
    /// parses as `D`.
    pub fn parse_and_ok_mock<D: Deserial, S>(
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            Ok((false, Some(return_value.clone())))
        })
    }

    /// Mock entrypoint that parses the parameter as `D` and accepts the
    /// invocation only when `check` passes on it.
    pub fn parse_and_check_mock<D: Deserial, S>(
        check: impl Fn(&D) -> bool + 'static,
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, Some(return_value.clone())))
        })
    }

    /// Mock entrypoint that rejects every invocation.
    pub fn rejecting_mock<S>() -> MockFn<S> {
        MockFn::new(|_parameter, _amount, _balance, _state: &mut S| {
            Err::<(bool, Option<()>), _>(CallContractError::Trap)
        })
    }
}
