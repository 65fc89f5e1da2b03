// implementation of the blocking channel.
//
// the basic architecture is as such:
//
// channel handles wrap around Arc<shared state>
//                                     |
//          /--------------------------/
//          v
//       shared state
//          |
//          |------ it contains a Mutex<lockable state>, which holds the FIFO buffer of elements
//          |       and the count of receivers currently inside recv. that count is what a
//          |       rendezvous (capacity zero) sender's wait condition reads.
//          |
//          |------ it contains the closed flag as an AtomicBool. it is readable without taking
//          |       the mutex, but every decision send/recv makes against it happens while
//          |       holding the mutex.
//          |
//          \------ it contains two condvars: senders block on one, receivers on the other.
//                  send and recv notify their counterpart; close notifies both.
//
// the organization of these modules is as such:
//
//      core: This owns all the synchronization. It presents blocking and deadline-bounded send
//            and recv against a Timeout, plus close, and nothing else.
//
//      api:  This is a wrapper around core that adapts it into the exposed handle and iterator
//            API. The crate re-exports this API publically.
//
// there is also the error module, which contains the relevant error types, which is also
// re-exported publically.

pub(crate) mod error;
pub(crate) mod api;

mod core;
