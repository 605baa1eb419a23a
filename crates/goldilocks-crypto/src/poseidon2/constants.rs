//! Round constants and internal-layer diagonal for the width-12 permutation.

use crate::field::Fp;

use super::{PARTIAL_ROUNDS, WIDTH};

/// Number of full rounds, split evenly around the partial rounds.
pub const FULL_ROUNDS: usize = 8;

/// Constants added to every lane in each full round.
pub const EXTERNAL_CONSTANTS: [[Fp; WIDTH]; FULL_ROUNDS] = [
    [
        Fp::from_canonical_u64(15492826721047263190),
        Fp::from_canonical_u64(11728330187201910315),
        Fp::from_canonical_u64(8836021247773420868),
        Fp::from_canonical_u64(16777404051263952451),
        Fp::from_canonical_u64(5510875212538051896),
        Fp::from_canonical_u64(6173089941271892285),
        Fp::from_canonical_u64(2927757366422211339),
        Fp::from_canonical_u64(10340958981325008808),
        Fp::from_canonical_u64(8541987352684552425),
        Fp::from_canonical_u64(9739599543776434497),
        Fp::from_canonical_u64(15073950188101532019),
        Fp::from_canonical_u64(12084856431752384512),
    ],
    [
        Fp::from_canonical_u64(4584713381960671270),
        Fp::from_canonical_u64(8807052963476652830),
        Fp::from_canonical_u64(54136601502601741),
        Fp::from_canonical_u64(4872702333905478703),
        Fp::from_canonical_u64(5551030319979516287),
        Fp::from_canonical_u64(12889366755535460989),
        Fp::from_canonical_u64(16329242193178844328),
        Fp::from_canonical_u64(412018088475211848),
        Fp::from_canonical_u64(10505784623379650541),
        Fp::from_canonical_u64(9758812378619434837),
        Fp::from_canonical_u64(7421979329386275117),
        Fp::from_canonical_u64(375240370024755551),
    ],
    [
        Fp::from_canonical_u64(3331431125640721931),
        Fp::from_canonical_u64(15684937309956309981),
        Fp::from_canonical_u64(578521833432107983),
        Fp::from_canonical_u64(14379242000670861838),
        Fp::from_canonical_u64(17922409828154900976),
        Fp::from_canonical_u64(8153494278429192257),
        Fp::from_canonical_u64(15904673920630731971),
        Fp::from_canonical_u64(11217863998460634216),
        Fp::from_canonical_u64(3301540195510742136),
        Fp::from_canonical_u64(9937973023749922003),
        Fp::from_canonical_u64(3059102938155026419),
        Fp::from_canonical_u64(1895288289490976132),
    ],
    [
        Fp::from_canonical_u64(5580912693628927540),
        Fp::from_canonical_u64(10064804080494788323),
        Fp::from_canonical_u64(9582481583369602410),
        Fp::from_canonical_u64(10186259561546797986),
        Fp::from_canonical_u64(247426333829703916),
        Fp::from_canonical_u64(13193193905461376067),
        Fp::from_canonical_u64(6386232593701758044),
        Fp::from_canonical_u64(17954717245501896472),
        Fp::from_canonical_u64(1531720443376282699),
        Fp::from_canonical_u64(2455761864255501970),
        Fp::from_canonical_u64(11234429217864304495),
        Fp::from_canonical_u64(4746959618548874102),
    ],
    [
        Fp::from_canonical_u64(13571697342473846203),
        Fp::from_canonical_u64(17477857865056504753),
        Fp::from_canonical_u64(15963032953523553760),
        Fp::from_canonical_u64(16033593225279635898),
        Fp::from_canonical_u64(14252634232868282405),
        Fp::from_canonical_u64(8219748254835277737),
        Fp::from_canonical_u64(7459165569491914711),
        Fp::from_canonical_u64(15855939513193752003),
        Fp::from_canonical_u64(16788866461340278896),
        Fp::from_canonical_u64(7102224659693946577),
        Fp::from_canonical_u64(3024718005636976471),
        Fp::from_canonical_u64(13695468978618890430),
    ],
    [
        Fp::from_canonical_u64(8214202050877825436),
        Fp::from_canonical_u64(2670727992739346204),
        Fp::from_canonical_u64(16259532062589659211),
        Fp::from_canonical_u64(11869922396257088411),
        Fp::from_canonical_u64(3179482916972760137),
        Fp::from_canonical_u64(13525476046633427808),
        Fp::from_canonical_u64(3217337278042947412),
        Fp::from_canonical_u64(14494689598654046340),
        Fp::from_canonical_u64(15837379330312175383),
        Fp::from_canonical_u64(8029037639801151344),
        Fp::from_canonical_u64(2153456285263517937),
        Fp::from_canonical_u64(8301106462311849241),
    ],
    [
        Fp::from_canonical_u64(13294194396455217955),
        Fp::from_canonical_u64(17394768489610594315),
        Fp::from_canonical_u64(12847609130464867455),
        Fp::from_canonical_u64(14015739446356528640),
        Fp::from_canonical_u64(5879251655839607853),
        Fp::from_canonical_u64(9747000124977436185),
        Fp::from_canonical_u64(8950393546890284269),
        Fp::from_canonical_u64(10765765936405694368),
        Fp::from_canonical_u64(14695323910334139959),
        Fp::from_canonical_u64(16366254691123000864),
        Fp::from_canonical_u64(15292774414889043182),
        Fp::from_canonical_u64(10910394433429313384),
    ],
    [
        Fp::from_canonical_u64(17253424460214596184),
        Fp::from_canonical_u64(3442854447664030446),
        Fp::from_canonical_u64(3005570425335613727),
        Fp::from_canonical_u64(10859158614900201063),
        Fp::from_canonical_u64(9763230642109343539),
        Fp::from_canonical_u64(6647722546511515039),
        Fp::from_canonical_u64(909012944955815706),
        Fp::from_canonical_u64(18101204076790399111),
        Fp::from_canonical_u64(11588128829349125809),
        Fp::from_canonical_u64(15863878496612806566),
        Fp::from_canonical_u64(5201119062417750399),
        Fp::from_canonical_u64(176665553780565743),
    ],
];

/// Constants added to lane 0 in each partial round.
pub const INTERNAL_CONSTANTS: [Fp; PARTIAL_ROUNDS] = [
    Fp::from_canonical_u64(11921381764981422944),
    Fp::from_canonical_u64(10318423381711320787),
    Fp::from_canonical_u64(8291411502347000766),
    Fp::from_canonical_u64(229948027109387563),
    Fp::from_canonical_u64(9152521390190983261),
    Fp::from_canonical_u64(7129306032690285515),
    Fp::from_canonical_u64(15395989607365232011),
    Fp::from_canonical_u64(8641397269074305925),
    Fp::from_canonical_u64(17256848792241043600),
    Fp::from_canonical_u64(6046475228902245682),
    Fp::from_canonical_u64(12041608676381094092),
    Fp::from_canonical_u64(12785542378683951657),
    Fp::from_canonical_u64(14546032085337914034),
    Fp::from_canonical_u64(3304199118235116851),
    Fp::from_canonical_u64(16499627707072547655),
    Fp::from_canonical_u64(10386478025625759321),
    Fp::from_canonical_u64(13475579315436919170),
    Fp::from_canonical_u64(16042710511297532028),
    Fp::from_canonical_u64(1411266850385657080),
    Fp::from_canonical_u64(9024840976168649958),
    Fp::from_canonical_u64(14047056970978379368),
    Fp::from_canonical_u64(838728605080212101),
];

/// Diagonal of the internal layer, applied as `s[i] * diag[i] + sum(s)`.
pub const MATRIX_DIAG_12: [Fp; WIDTH] = [
    Fp::from_canonical_u64(0xc3b6c08e23ba9300),
    Fp::from_canonical_u64(0xd84b5de94a324fb6),
    Fp::from_canonical_u64(0x0d0c371c5b35b84f),
    Fp::from_canonical_u64(0x7964f570e7188037),
    Fp::from_canonical_u64(0x5daf18bbd996604b),
    Fp::from_canonical_u64(0x6743bc47b9595257),
    Fp::from_canonical_u64(0x5528b9362c59bb70),
    Fp::from_canonical_u64(0xac45e25b7127b68b),
    Fp::from_canonical_u64(0xa2077d7dfbb606b5),
    Fp::from_canonical_u64(0xf3faac6faee378ae),
    Fp::from_canonical_u64(0x0c6388b51545e883),
    Fp::from_canonical_u64(0xd27dbb6944917b60),
];
