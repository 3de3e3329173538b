//! Order history, order details and cancellation.

use cartwheel_core::{Order, OrderFilter, OrderId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersAction {
    FetchPending,
    UserOrdersFulfilled(Vec<Order>),
    DetailsFulfilled(Box<Order>),
    FetchRejected(String),
    CancelPending(OrderId),
    CancelFulfilled(Box<Order>),
    CancelRejected(String),
    ClearOrderError,
    ClearCurrentOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersState {
    pub orders: Vec<Order>,
    pub current_order: Option<Order>,
    pub loading: bool,
    pub error: Option<String>,
    /// Id of the order whose cancellation is in flight.
    pub cancelling_order: Option<OrderId>,
    pub cancel_error: Option<String>,
}

impl OrdersState {
    pub fn reduce(&mut self, action: OrdersAction) {
        match action {
            OrdersAction::FetchPending => {
                self.loading = true;
                self.error = None;
            }
            OrdersAction::UserOrdersFulfilled(orders) => {
                self.orders = orders;
                self.loading = false;
            }
            OrdersAction::DetailsFulfilled(order) => {
                self.current_order = Some(*order);
                self.loading = false;
            }
            OrdersAction::FetchRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            OrdersAction::CancelPending(id) => {
                self.cancelling_order = Some(id);
                self.cancel_error = None;
            }
            OrdersAction::CancelFulfilled(order) => {
                self.cancelling_order = None;
                if let Some(existing) = self
                    .orders
                    .iter_mut()
                    .find(|existing| existing.order_id == order.order_id)
                {
                    existing.clone_from(&order);
                }
                if let Some(current) = self.current_order.as_mut()
                    && current.order_id == order.order_id
                {
                    *current = *order;
                }
            }
            OrdersAction::CancelRejected(message) => {
                self.cancelling_order = None;
                self.cancel_error = Some(message);
            }
            OrdersAction::ClearOrderError => {
                self.error = None;
                self.cancel_error = None;
            }
            OrdersAction::ClearCurrentOrder => self.current_order = None,
        }
    }

    /// Orders shown under a status tab.
    pub fn filtered(&self, filter: OrderFilter) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |order| filter.matches(order.status))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cartwheel_core::OrderStatus;
    use rust_decimal::Decimal;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: None,
            order_id: OrderId::new(id),
            status,
            items: Vec::new(),
            total_amount: Decimal::new(100, 0),
            delivery_charge: Decimal::new(40, 0),
            shipping_address: None,
            created_at: None,
        }
    }

    #[test]
    fn test_fetch_lifecycle() {
        let mut state = OrdersState::default();
        state.reduce(OrdersAction::FetchPending);
        assert!(state.loading);
        state.reduce(OrdersAction::UserOrdersFulfilled(vec![order("a", OrderStatus::Pending)]));
        assert!(!state.loading);
        assert_eq!(state.orders.len(), 1);

        state.reduce(OrdersAction::FetchPending);
        state.reduce(OrdersAction::FetchRejected("boom".to_owned()));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.orders.len(), 1);
    }

    #[test]
    fn test_cancel_replaces_list_entry_and_current_order() {
        let mut state = OrdersState::default();
        state.reduce(OrdersAction::UserOrdersFulfilled(vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Shipped),
        ]));
        state.reduce(OrdersAction::DetailsFulfilled(Box::new(order("a", OrderStatus::Pending))));

        state.reduce(OrdersAction::CancelPending(OrderId::new("a")));
        assert_eq!(state.cancelling_order, Some(OrderId::new("a")));

        state.reduce(OrdersAction::CancelFulfilled(Box::new(order("a", OrderStatus::Cancelled))));
        assert!(state.cancelling_order.is_none());
        assert_eq!(state.orders[0].status, OrderStatus::Cancelled);
        assert_eq!(state.orders[1].status, OrderStatus::Shipped);
        assert_eq!(state.current_order.as_ref().unwrap().status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_rejected_and_clear() {
        let mut state = OrdersState::default();
        state.reduce(OrdersAction::CancelPending(OrderId::new("a")));
        state.reduce(OrdersAction::CancelRejected("too late".to_owned()));
        assert!(state.cancelling_order.is_none());
        assert_eq!(state.cancel_error.as_deref(), Some("too late"));

        state.reduce(OrdersAction::ClearOrderError);
        assert!(state.cancel_error.is_none());
    }

    #[test]
    fn test_filtered_by_status() {
        let mut state = OrdersState::default();
        state.reduce(OrdersAction::UserOrdersFulfilled(vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Delivered),
            order("c", OrderStatus::Pending),
        ]));
        assert_eq!(state.filtered(OrderFilter::All).count(), 3);
        assert_eq!(
            state
                .filtered(OrderFilter::Status(OrderStatus::Pending))
                .count(),
            2
        );
    }
}
