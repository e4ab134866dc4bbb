use super::*;

/// A cons-like tree: each node owns the rest of the chain.
enum Chain {
    End,
    Link(u64, Box<Chain>),
}

fn build_chain(len: u64) -> Chain {
    let mut chain = Chain::End;
    for n in (0..len).rev() {
        chain = Chain::Link(n, Box::new(chain));
    }
    chain
}

fn sum_chain(chain: &Chain) -> u64 {
    ensure_sufficient_stack(|| match chain {
        Chain::End => 0,
        Chain::Link(n, rest) => n + sum_chain(rest),
    })
}

fn unlink(mut chain: Chain) {
    while let Chain::Link(_, rest) = chain {
        chain = *rest;
    }
}

#[test]
fn short_chain_sums() {
    let chain = build_chain(5);
    assert_eq!(sum_chain(&chain), 10);
    unlink(chain);
}

#[test]
fn deep_chain_does_not_overflow() {
    // 200k nested links would overflow a default 8MB stack without growth.
    let chain = build_chain(200_000);
    assert_eq!(sum_chain(&chain), 199_999 * 200_000 / 2);
    unlink(chain);
}

#[test]
fn passes_through_results() {
    let result: Result<&str, u8> = ensure_sufficient_stack(|| Err(7));
    assert_eq!(result, Err(7));
}
