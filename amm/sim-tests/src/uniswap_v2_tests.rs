use crate::utils::*;

use amm::{Router, PSP22};
use anyhow::Result;
use assert2::assert;
use log::info;

struct Deployment {
    setup: Setup,
    usdt: amm::AccountId,
    busd: amm::AccountId,
}

fn deploy() -> Deployment {
    let mut setup = setup();
    let usdt = psp22_utils::setup(&mut setup.chain, USDT, bob());
    let busd = psp22_utils::setup(&mut setup.chain, BUSD, bob());
    Deployment { setup, usdt, busd }
}

/// Deploys both tokens and adds `LP_AMOUNT` of each with the whole supply approved.
fn deploy_with_liquidity() -> Result<Deployment> {
    let mut deployment = deploy();
    let Deployment {
        setup: Setup { chain, router },
        usdt,
        busd,
    } = &mut deployment;
    psp22_utils::approve(chain, *usdt, router.account_id(), TOTAL_SUPPLY, bob())?;
    psp22_utils::approve(chain, *busd, router.account_id(), TOTAL_SUPPLY, bob())?;
    let deadline = router::deadline(chain);
    chain.set_actor(bob());
    router
        .add_liquidity(
            chain, *usdt, *busd, LP_AMOUNT, LP_AMOUNT, LP_AMOUNT, LP_AMOUNT, bob(), deadline,
        )
        .into_anyhow()?;
    Ok(deployment)
}

#[test]
fn assigns_total_supply_to_owner() {
    let Deployment { setup, usdt, busd } = deploy();
    let chain = setup.chain;

    assert!(chain.total_supply(usdt) == chain.balance_of(usdt, bob()));
    assert!(chain.total_supply(busd) == chain.balance_of(busd, bob()));
    assert!(chain.total_supply(usdt) == TOTAL_SUPPLY);
}

#[test]
fn add_liquidity_sets_reserves() -> Result<()> {
    let Deployment { setup, usdt, busd } = deploy_with_liquidity()?;
    let chain = setup.chain;

    let pair = pair::get(&chain, usdt, busd)?;
    let (reserve_0, reserve_1, _) = amm::Pair::get_reserves(pair);
    assert!(reserve_0 == LP_AMOUNT);
    assert!(reserve_1 == LP_AMOUNT);
    assert!(pair.balance_of(bob()) == 9_999_999_999_999_999_999_000);
    assert!(chain.balance_of(usdt, bob()) == TOTAL_SUPPLY - LP_AMOUNT);
    Ok(())
}

#[test]
fn swap_exact_usdt_for_busd() -> Result<()> {
    let Deployment {
        setup: Setup { mut chain, router },
        usdt,
        busd,
    } = deploy_with_liquidity()?;

    let deadline = router::deadline(&chain);
    let amounts = router
        .swap_exact_tokens_for_tokens(
            &mut chain,
            10 * TOKEN,
            9 * TOKEN,
            vec![usdt, busd],
            bob(),
            deadline,
        )
        .into_anyhow()?;
    info!("swapped exact USDT for BUSD: {:?}", amounts);

    assert!(amounts == vec![10 * TOKEN, 9_960_069_810_399_032_164]);
    assert!(chain.balance_of(usdt, bob()) == 989_990 * TOKEN);
    assert!(chain.balance_of(busd, bob()) == 990_009_960_069_810_399_032_164);
    Ok(())
}

#[test]
fn swap_usdt_for_exact_busd() -> Result<()> {
    let Deployment {
        setup: Setup { mut chain, router },
        usdt,
        busd,
    } = deploy_with_liquidity()?;

    let deadline = router::deadline(&chain);
    router
        .swap_exact_tokens_for_tokens(
            &mut chain,
            10 * TOKEN,
            9 * TOKEN,
            vec![usdt, busd],
            bob(),
            deadline,
        )
        .into_anyhow()?;
    let amounts = router
        .swap_tokens_for_exact_tokens(
            &mut chain,
            10 * TOKEN,
            11 * TOKEN,
            vec![usdt, busd],
            bob(),
            deadline,
        )
        .into_anyhow()?;
    info!("swapped USDT for exact BUSD: {:?}", amounts);

    assert!(amounts == vec![10_060_200_591_694_934_604, 10 * TOKEN]);
    assert!(chain.balance_of(usdt, bob()) == 989_979_939_799_408_305_065_396);
    assert!(chain.balance_of(busd, bob()) == 990_019_960_069_810_399_032_164);
    Ok(())
}
