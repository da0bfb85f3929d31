mod tests {
    use myrtio_marquee::line_buffer::LINE_CAPACITY;
    use myrtio_marquee::{LineBuffer, RxQueue, SerialInput};

    fn feed(buffer: &mut LineBuffer, bytes: &[u8]) -> Vec<String> {
        bytes
            .iter()
            .filter_map(|&byte| buffer.push(byte).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_splits_lines_and_strips_carriage_returns() {
        let mut buffer = LineBuffer::new();
        let lines = feed(&mut buffer, b"t/1\r\nhello\nwor");
        assert_eq!(lines, ["t/1", "hello"]);
        let lines = feed(&mut buffer, b"ld\r\n");
        assert_eq!(lines, ["world"]);
    }

    #[test]
    fn test_skips_empty_and_invalid_lines() {
        let mut buffer = LineBuffer::new();
        let lines = feed(&mut buffer, b"\r\n\n\xff\xfe\nok\n");
        assert_eq!(lines, ["ok"]);
    }

    #[test]
    fn test_overflow_keeps_newest_bytes() {
        let mut buffer = LineBuffer::new();
        let mut input = vec![b'a'; LINE_CAPACITY];
        input.extend_from_slice(b"tail\n");
        let lines = feed(&mut buffer, &input);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("tail"));
        assert!(lines[0].len() <= LINE_CAPACITY);
        assert!(buffer.dropped() > 0);

        let lines = feed(&mut buffer, b"next\n");
        assert_eq!(lines, ["next"]);
    }

    #[test]
    fn test_rx_queue_drops_on_overrun() {
        let queue: RxQueue<4> = RxQueue::new();
        assert_eq!(queue.push_bytes(b"abcdef"), 4);
        assert_eq!(queue.overruns(), 2);

        let mut reader = queue.reader();
        let mut drained = Vec::new();
        while let Some(byte) = reader.read_byte() {
            drained.push(byte);
        }
        assert_eq!(drained, b"abcd");
    }
}
