use ratioswap_types::{AccountId, Amount, Direction, Order, OrderId, RatioSwapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Append-only table of pending orders
///
/// Ids are handed out from 1 and never reused. Orders are never removed; the
/// only mutation is the one-way flip of `executed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    next_id: OrderId,
    orders: BTreeMap<OrderId, Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook {
            next_id: 1,
            orders: BTreeMap::new(),
        }
    }

    /// Id the next created order will receive
    pub fn next_id(&self) -> OrderId {
        self.next_id
    }

    /// Record a new pending order and return its id
    pub fn create(&mut self, user: AccountId, amount: Amount, direction: Direction) -> OrderId {
        let id = self.next_id;
        self.orders.insert(id, Order::new(id, user, amount, direction));
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: OrderId) -> Result<&Order> {
        self.orders.get(&id).ok_or(RatioSwapError::OrderNotFound(id))
    }

    /// Look up an order that can still be executed
    pub fn get_executable(&self, id: OrderId) -> Result<&Order> {
        let order = self.get(id)?;
        if order.executed {
            return Err(RatioSwapError::OrderAlreadyExecuted(id));
        }
        Ok(order)
    }

    /// Flip `executed` on a pending order
    pub fn mark_executed(&mut self, id: OrderId) -> Result<()> {
        let order = self
            .orders
            .get_mut(&id)
            .ok_or(RatioSwapError::OrderNotFound(id))?;
        if order.executed {
            return Err(RatioSwapError::OrderAlreadyExecuted(id));
        }
        order.executed = true;
        Ok(())
    }

    /// Orders not yet executed, ascending by id
    pub fn pending(&self) -> impl Iterator<Item = &Order> {
        self.orders.values().filter(|order| order.is_pending())
    }

    /// All orders ever created, ascending by id
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
