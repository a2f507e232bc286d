//! Removal order of every discipline checked against a reference model

#[cfg(test)]
mod tests {
    use crate::queue::api::{BaseElement, OrderDiscipline, PriorityElement, Queue, QueueError};
    use crate::queue::order::priority_key;
    use strum::IntoEnumIterator;

    /// Straightforward model of each discipline: picks the next element by
    /// scanning, with insertion sequence numbers as the age.
    struct Model {
        order: OrderDiscipline,
        limit: usize,
        seq: u64,
        items: Vec<(u64, f64, u32)>,
    }

    impl Model {
        fn new(order: OrderDiscipline, limit: usize) -> Self {
            Self {
                order,
                limit,
                seq: 0,
                items: Vec::new(),
            }
        }

        fn insert(&mut self, content: u32, priority: f64) {
            if self.order == OrderDiscipline::FifoLimited && self.limit != 0 {
                while self.items.len() >= self.limit {
                    self.take();
                }
            }
            self.items.push((self.seq, priority, content));
            self.seq += 1;
        }

        fn next_index(&self) -> Option<usize> {
            let indices = 0..self.items.len();
            let age = |i: &usize| self.items[*i].0;
            match self.order {
                OrderDiscipline::Fifo | OrderDiscipline::FifoLimited => indices.min_by_key(age),
                OrderDiscipline::Lifo => indices.max_by_key(age),
                OrderDiscipline::PriorityHigh => indices.min_by(|a, b| {
                    let pa = priority_key(self.items[*a].1);
                    let pb = priority_key(self.items[*b].1);
                    pb.total_cmp(&pa).then(age(a).cmp(&age(b)))
                }),
                OrderDiscipline::PriorityLow => indices.min_by(|a, b| {
                    let pa = priority_key(self.items[*a].1);
                    let pb = priority_key(self.items[*b].1);
                    pa.total_cmp(&pb).then(age(a).cmp(&age(b)))
                }),
            }
        }

        fn take(&mut self) -> Option<(u32, f64)> {
            let index = self.next_index()?;
            let (_, priority, content) = self.items.remove(index);
            Some((content, priority))
        }

        fn peek(&self) -> Option<(f64, u32)> {
            self.next_index()
                .map(|i| (self.items[i].1, self.items[i].2))
        }
    }

    /// Deterministic pseudo-random stream (64-bit LCG)
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (self.0 >> 33) % bound
        }
    }

    fn drain(queue: &Queue<u32>) -> Vec<(u32, f64)> {
        std::iter::from_fn(|| queue.remove().ok()).collect()
    }

    #[test]
    fn test_interleaved_operations_match_model() {
        for order in OrderDiscipline::iter() {
            for seed in 1..=4 {
                let limit = if order == OrderDiscipline::FifoLimited { 7 } else { 0 };
                let queue = Queue::with_limit(order, limit as i64).unwrap();
                let mut model = Model::new(order, limit);
                let mut rng = Lcg(seed);

                for content in 0..2_000u32 {
                    if rng.next(3) == 0 {
                        let expected = model.take();
                        let actual = queue.remove().ok();
                        assert_eq!(actual, expected, "{} seed {} step {}", order, seed, content);
                    } else {
                        // few distinct priorities so ties are common
                        let priority = rng.next(5) as f64 - 2.0;
                        queue
                            .insert(PriorityElement::new(content, priority))
                            .unwrap();
                        model.insert(content, priority);
                    }
                    assert_eq!(queue.len(), model.items.len());
                    assert_eq!(queue.peek().ok(), model.peek());
                }

                let rest: Vec<_> = std::iter::from_fn(|| model.take()).collect();
                assert_eq!(drain(&queue), rest, "{} seed {} drain", order, seed);
            }
        }
    }

    #[test]
    fn test_tail_is_next_removed_after_every_insert() {
        for order in OrderDiscipline::iter() {
            let queue = Queue::new(order);
            let mut rng = Lcg(99);
            for content in 0..200u32 {
                let priority = rng.next(10) as f64;
                queue.insert(PriorityElement::new(content, priority)).unwrap();

                let tail = queue
                    .lock()
                    .elements()
                    .last()
                    .map(|e| (*e.content(), e.priority()));
                assert_eq!(tail, queue.clone().remove().ok());
            }
        }
    }

    #[test]
    fn test_priority_buffer_stays_sorted() {
        let high = Queue::new(OrderDiscipline::PriorityHigh);
        let low = Queue::new(OrderDiscipline::PriorityLow);
        let mut rng = Lcg(5);
        for content in 0..500u32 {
            let priority = rng.next(50) as f64 / 4.0;
            high.insert(PriorityElement::new(content, priority)).unwrap();
            low.insert(PriorityElement::new(content, priority)).unwrap();
        }

        let high_priorities: Vec<f64> = high.lock().elements().map(|e| e.priority()).collect();
        assert!(high_priorities.windows(2).all(|w| w[0] <= w[1]));

        let low_priorities: Vec<f64> = low.lock().elements().map(|e| e.priority()).collect();
        assert!(low_priorities.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_fifo_and_lifo_basics() {
        let fifo = Queue::new(OrderDiscipline::Fifo);
        let lifo = Queue::new(OrderDiscipline::Lifo);
        for c in 1..=3 {
            fifo.insert(BaseElement::new(c)).unwrap();
            lifo.insert(BaseElement::new(c)).unwrap();
        }

        let fifo_order: Vec<u32> = drain(&fifo).into_iter().map(|(c, _)| c).collect();
        let lifo_order: Vec<u32> = drain(&lifo).into_iter().map(|(c, _)| c).collect();
        assert_eq!(fifo_order, vec![1, 2, 3]);
        assert_eq!(lifo_order, vec![3, 2, 1]);
    }

    #[test]
    fn test_priority_ties_are_fifo() {
        let queue = Queue::new(OrderDiscipline::PriorityHigh);
        for (c, p) in [(1, 5.0), (2, 5.0), (3, 9.0), (4, 5.0), (5, 1.0)] {
            queue.insert(PriorityElement::new(c, p)).unwrap();
        }
        assert_eq!(
            drain(&queue),
            vec![(3, 9.0), (1, 5.0), (2, 5.0), (4, 5.0), (5, 1.0)]
        );
    }

    #[test]
    fn test_fifo_limited_drops_oldest() {
        let queue = Queue::with_limit(OrderDiscipline::FifoLimited, 3).unwrap();
        for c in 1..=5 {
            queue.insert(BaseElement::new(c)).unwrap();
            assert!(queue.len() <= 3);
        }
        let order: Vec<u32> = drain(&queue).into_iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![3, 4, 5]);
    }

    #[test]
    fn test_negative_and_fractional_priorities() {
        let queue = Queue::new(OrderDiscipline::PriorityLow);
        for (c, p) in [(1, 0.5), (2, -3.25), (3, 0.25), (4, -0.0), (5, 1e9)] {
            queue.insert(PriorityElement::new(c, p)).unwrap();
        }
        let order: Vec<u32> = drain(&queue).into_iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![2, 4, 3, 1, 5]);
    }

    #[test]
    fn test_empty_queue_errors() {
        for order in OrderDiscipline::iter() {
            let queue: Queue<u32> = Queue::new(order);
            assert!(matches!(queue.remove(), Err(QueueError::EmptyQueue)));
            assert!(matches!(queue.peek(), Err(QueueError::EmptyQueue)));
            assert!(matches!(queue.peek_at(0), Err(QueueError::EmptyQueue)));
        }
    }

    #[test]
    fn test_update_priority_then_drain() {
        let queue = Queue::new(OrderDiscipline::PriorityHigh);
        for (c, p) in [(1, 1.0), (2, 2.0), (3, 1.0), (4, 3.0)] {
            queue.insert(PriorityElement::new(c, p)).unwrap();
        }
        assert_eq!(queue.update_priority(1.0, 10.0, false), 2);
        assert_eq!(queue.update_priority(7.0, 8.0, false), 0);

        let order: Vec<u32> = drain(&queue).into_iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_negative_zero_ties_with_base_elements() {
        let queue = Queue::new(OrderDiscipline::PriorityHigh);
        queue.insert(PriorityElement::new("old", -0.0)).unwrap();
        queue.insert(BaseElement::new("young")).unwrap();
        queue.insert(PriorityElement::new("youngest", 0.0)).unwrap();
        let order: Vec<&str> = std::iter::from_fn(|| queue.remove().ok().map(|(c, _)| c)).collect();
        assert_eq!(order, vec!["old", "young", "youngest"]);

        let queue = Queue::new(OrderDiscipline::PriorityLow);
        queue.insert(BaseElement::new("base")).unwrap();
        queue.insert(PriorityElement::new("signed", -0.0)).unwrap();
        queue.insert(PriorityElement::new("low", -1.0)).unwrap();
        assert_eq!(queue.update_priority(0.0, 5.0, false), 1);
        assert_eq!(queue.remove().unwrap(), ("low", -1.0));
        assert_eq!(queue.remove().unwrap(), ("base", 0.0));
        assert_eq!(queue.remove().unwrap(), ("signed", 5.0));
    }

    #[test]
    fn test_signed_zeros_match_model() {
        for order in [OrderDiscipline::PriorityHigh, OrderDiscipline::PriorityLow] {
            let queue = Queue::new(order);
            let mut model = Model::new(order, 0);
            let mut rng = Lcg(11);

            for content in 0..500u32 {
                match rng.next(4) {
                    0 => {
                        let expected = model.take();
                        assert_eq!(queue.remove().ok(), expected, "{} step {}", order, content);
                    }
                    1 => {
                        queue.insert(BaseElement::new(content)).unwrap();
                        model.insert(content, 0.0);
                    }
                    2 => {
                        queue.insert(PriorityElement::new(content, -0.0)).unwrap();
                        model.insert(content, -0.0);
                    }
                    _ => {
                        let priority = if rng.next(2) == 0 { 1.0 } else { -1.0 };
                        queue.insert(PriorityElement::new(content, priority)).unwrap();
                        model.insert(content, priority);
                    }
                }
            }

            let rest: Vec<_> = std::iter::from_fn(|| model.take()).collect();
            assert_eq!(drain(&queue), rest, "{} drain", order);
        }
    }
}
